use crate::models::{FeeBreakdown, TopUpQuote};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-up fee: 5%.
pub const FEE_RATE_BPS: u32 = 500;

const BPS_DENOMINATOR: f64 = 10_000.0;

/// How the top-up fee relates to the amount the user entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeePolicy {
    /// Fee is charged on top; the entered amount is credited in full.
    #[default]
    Added,
    /// Fee comes out of the entered amount; the remainder is credited.
    Deducted,
    /// No fee.
    Waived,
}

impl FromStr for FeePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "added" | "add" | "surcharge" => Ok(FeePolicy::Added),
            "deducted" | "deduct" | "subtracted" => Ok(FeePolicy::Deducted),
            "waived" | "none" => Ok(FeePolicy::Waived),
            other => Err(format!("unknown fee policy: {}", other)),
        }
    }
}

impl fmt::Display for FeePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeePolicy::Added => "added",
            FeePolicy::Deducted => "deducted",
            FeePolicy::Waived => "waived",
        };
        f.write_str(name)
    }
}

/// `fee = round(base * rate)`, `total = base + fee`.
pub fn calculate_fee(base: f64, rate_bps: u32) -> FeeBreakdown {
    let fee = (base * rate_bps as f64 / BPS_DENOMINATOR).round();
    FeeBreakdown {
        base,
        fee,
        total: base + fee,
    }
}

/// Prices a validated amount under `policy`.
#[derive(Debug, Clone)]
pub struct FeeCalculator {
    policy: FeePolicy,
    pepu_per_eth: f64,
    treasury_address: String,
}

impl FeeCalculator {
    pub fn new(policy: FeePolicy, pepu_per_eth: f64, treasury_address: String) -> Self {
        Self {
            policy,
            pepu_per_eth,
            treasury_address,
        }
    }

    pub fn policy(&self) -> FeePolicy {
        self.policy
    }

    pub fn rate_bps(&self) -> u32 {
        match self.policy {
            FeePolicy::Waived => 0,
            FeePolicy::Added | FeePolicy::Deducted => FEE_RATE_BPS,
        }
    }

    pub fn quote(&self, amount: f64) -> TopUpQuote {
        let breakdown = calculate_fee(amount, self.rate_bps());
        let (charged, credited) = match self.policy {
            FeePolicy::Added => (breakdown.total, amount),
            FeePolicy::Deducted => (amount, amount - breakdown.fee),
            FeePolicy::Waived => (amount, amount),
        };

        TopUpQuote {
            amount,
            fee: breakdown.fee,
            total: breakdown.total,
            fee_rate_bps: self.rate_bps(),
            policy: self.policy,
            charged,
            credited,
            charged_eth: charged / self.pepu_per_eth,
            treasury_address: self.treasury_address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator(policy: FeePolicy) -> FeeCalculator {
        FeeCalculator::new(
            policy,
            1_000_000.0,
            "0x1234567890123456789012345678901234567890".to_string(),
        )
    }

    #[test]
    fn five_percent_of_one_thousand() {
        let breakdown = calculate_fee(1000.0, FEE_RATE_BPS);
        assert_eq!(breakdown.fee, 50.0);
        assert_eq!(breakdown.total, 1050.0);
    }

    #[test]
    fn fee_is_rounded_to_whole_units() {
        assert_eq!(calculate_fee(30.0, FEE_RATE_BPS).fee, 2.0); // 1.5
        assert_eq!(calculate_fee(29.0, FEE_RATE_BPS).fee, 1.0); // 1.45
        assert_eq!(calculate_fee(0.0, FEE_RATE_BPS).total, 0.0);

        for base in [0.0, 1.0, 999.0, 40_000.0, 123_456.0, 200_000.0] {
            let breakdown = calculate_fee(base, FEE_RATE_BPS);
            assert_eq!(breakdown.fee, (base * 0.05).round());
            assert_eq!(breakdown.total, base + breakdown.fee);
        }
    }

    #[test]
    fn added_policy_charges_on_top() {
        let quote = calculator(FeePolicy::Added).quote(40_000.0);
        assert_eq!(quote.fee, 2_000.0);
        assert_eq!(quote.charged, 42_000.0);
        assert_eq!(quote.credited, 40_000.0);
        assert_eq!(quote.charged_eth, 0.042);
    }

    #[test]
    fn deducted_policy_credits_the_remainder() {
        let quote = calculator(FeePolicy::Deducted).quote(40_000.0);
        assert_eq!(quote.charged, 40_000.0);
        assert_eq!(quote.credited, 38_000.0);
        assert_eq!(quote.total, 42_000.0);
    }

    #[test]
    fn waived_policy_has_no_fee() {
        let quote = calculator(FeePolicy::Waived).quote(75_000.0);
        assert_eq!(quote.fee, 0.0);
        assert_eq!(quote.fee_rate_bps, 0);
        assert_eq!(quote.charged, 75_000.0);
        assert_eq!(quote.credited, 75_000.0);
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("Added".parse::<FeePolicy>(), Ok(FeePolicy::Added));
        assert_eq!("subtracted".parse::<FeePolicy>(), Ok(FeePolicy::Deducted));
        assert_eq!("none".parse::<FeePolicy>(), Ok(FeePolicy::Waived));
        assert!("double".parse::<FeePolicy>().is_err());
        assert_eq!(FeePolicy::Deducted.to_string(), "deducted");
    }
}
