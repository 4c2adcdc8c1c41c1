use anyhow::Result;
use somi_cards::client::CardClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let base_url = std::env::var("SOMI_CARDS_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());
    let wallet = std::env::var("AGENT_WALLET_ADDRESS")?;
    let amount = std::env::var("AGENT_TOP_UP_AMOUNT").unwrap_or_else(|_| "40000".to_string());

    println!("Somi Cards Top-up Agent");
    println!("=======================");
    println!("Server: {}", base_url);
    println!("Wallet: {}", wallet);
    println!();

    let client = CardClient::new(&base_url);

    println!("Step 1: Loading dashboard...");
    let dashboard = match client.dashboard(&wallet, false).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            println!("[FAILED] {}", e);
            return Ok(());
        }
    };
    println!("   [OK] {} ({})", dashboard.full_name, dashboard.wallet_short);
    println!("   Balance: {}", dashboard.card.balance_display);
    println!("   Transactions: {}", dashboard.transactions.len());
    println!();

    println!("Step 2: Requesting quote for {} PEPU...", amount);
    let quote = match client.quote(&amount).await {
        Ok(quote) => quote,
        Err(e) => {
            println!("[FAILED] {}", e);
            return Ok(());
        }
    };
    println!("   Fee: {} ({} policy)", quote.fee, quote.policy);
    println!(
        "   Charged: {} PEPU (~{:.6} ETH) to {}",
        quote.charged, quote.charged_eth, quote.treasury_address
    );
    println!("   Credited: {} PEPU", quote.credited);
    println!();

    println!("Step 3: Submitting top-up...");
    match client.top_up(&wallet, &amount).await {
        Ok(receipt) => {
            println!("[SUCCESS] Top-up recorded:");
            println!("   Tx: {}", receipt.transaction.tx_hash);
            println!("   Balance: {} -> {}", receipt.previous_balance, receipt.new_balance);
        }
        Err(e) => {
            println!("[FAILED] {}", e);
        }
    }

    Ok(())
}
