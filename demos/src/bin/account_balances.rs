//! Demo 2: Account Balances
//!
//! Showcases: read-only signed requests, ordered balance list
//!
//! Run: cargo run --bin account_balances
//!
//! Reads COINSPOT_API_KEY and COINSPOT_API_SECRET from the environment or a
//! `.env` file. A read-only key is enough.

use colored::*;
use coinspot_rest::{CoinspotClient, Credentials};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("warn").init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  COINSPOT ACCOUNT BALANCES".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let creds = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!("  Set COINSPOT_API_KEY and COINSPOT_API_SECRET to run this demo.");
            return Ok(());
        }
    };

    let client = CoinspotClient::with_credentials(creds)?;
    client.read_only_api_status().await?;
    println!("{} Read-only key accepted\n", "✓".green());

    let balances = client.balance().await?;
    if balances.balances.is_empty() {
        println!("  No holdings");
        return Ok(());
    }

    println!(
        "  {:<8} {:>18} {:>14} {:>14}",
        "COIN".dimmed(),
        "BALANCE".dimmed(),
        "RATE".dimmed(),
        "AUD".dimmed()
    );
    for entry in &balances.balances {
        println!(
            "  {:<8} {:>18} {:>14} {:>14}",
            entry.coin.yellow(),
            entry.balance.balance.to_string(),
            format!("{:.2}", entry.balance.rate),
            format!("${:.2}", entry.balance.audbalance)
        );
    }
    println!();
    println!(
        "  {} {}",
        "TOTAL:".bold(),
        format!("${:.2}", balances.total_aud()).green().bold()
    );

    Ok(())
}
