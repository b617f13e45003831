//! Demo 3: Buy/Sell Quotes
//!
//! Showcases: full access signed requests, decimal amounts on the wire
//!
//! Run: cargo run --bin buy_quote [COIN] [AMOUNT]
//!
//! Only requests quotes; no order is placed. Needs a full access key in
//! COINSPOT_API_KEY / COINSPOT_API_SECRET (environment or `.env`).

use colored::*;
use coinspot_rest::{AmountType, CoinspotClient, Credentials};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let mut args = std::env::args().skip(1);
    let coin = args.next().unwrap_or_else(|| "BTC".to_string());
    let amount = match args.next() {
        Some(raw) => Decimal::from_str(&raw)?,
        None => dec!(0.001),
    };

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  COINSPOT BUY/SELL QUOTES".cyan().bold());
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

    let buy = client
        .buy_now_quote(&coin, amount, AmountType::Coin)
        .await?;
    let sell = client
        .sell_now_quote(&coin, amount, AmountType::Coin)
        .await?;

    println!("  {} {} {}", "Quote for".dimmed(), amount, coin.yellow().bold());
    println!(
        "  {} {:>14}  ({} ${:.2})",
        "BUY: ".green(),
        buy.rate,
        "total".dimmed(),
        buy.rate * amount
    );
    println!(
        "  {} {:>14}  ({} ${:.2})",
        "SELL:".red(),
        sell.rate,
        "total".dimmed(),
        sell.rate * amount
    );
    println!("  {} {:>14}", "GAP: ".cyan(), buy.rate - sell.rate);

    Ok(())
}
