use ethers::core::rand::{thread_rng, RngCore};
use ethers::types::H256;

/// Random 32-byte hash used as the transaction reference for a top-up.
/// Not observed on chain: nothing verifies it against a real transfer.
pub fn placeholder_tx_hash() -> String {
    let mut bytes = [0u8; 32];
    thread_rng().fill_bytes(&mut bytes);
    format!("{:?}", H256::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_like_a_transaction_hash() {
        let hash = placeholder_tx_hash();
        assert_eq!(hash.len(), 66);
        assert!(hash.starts_with("0x"));
        assert!(hash[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn hashes_are_fresh() {
        assert_ne!(placeholder_tx_hash(), placeholder_tx_hash());
    }
}
