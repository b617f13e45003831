//! Demo 1: Latest Prices
//!
//! Showcases: public endpoints, no credentials needed
//!
//! Run: cargo run --bin latest_prices [COIN...]

use colored::*;
use coinspot_rest::CoinspotClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  COINSPOT LATEST PRICES".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let mut coins: Vec<String> = std::env::args().skip(1).collect();
    if coins.is_empty() {
        coins = vec!["BTC".into(), "ETH".into(), "SOL".into(), "DOGE".into()];
    }

    let client = CoinspotClient::new()?;
    let latest = client.latest_prices().await?;
    println!(
        "{} {} coins listed\n",
        "✓".green(),
        latest.prices.len().to_string().bold()
    );

    println!(
        "  {:<8} {:>14} {:>14} {:>14} {:>12}",
        "COIN".dimmed(),
        "BID".dimmed(),
        "ASK".dimmed(),
        "LAST".dimmed(),
        "SPREAD".dimmed()
    );
    for coin in &coins {
        match latest.get(coin) {
            Some(price) => println!(
                "  {:<8} {:>14} {:>14} {:>14} {:>12}",
                coin.to_uppercase().yellow(),
                format!("${:.2}", price.bid),
                format!("${:.2}", price.ask),
                format!("${:.2}", price.last),
                format!("${:.4}", price.spread()).green()
            ),
            None => println!("  {:<8} {}", coin.to_uppercase().yellow(), "not listed".red()),
        }
    }

    if let Some(first) = coins.first() {
        let buy = client.latest_buy_price(first).await?;
        let sell = client.latest_sell_price(first).await?;
        println!();
        println!(
            "  {} {} buy {} / sell {}",
            "→".cyan(),
            buy.market.bold(),
            buy.rate.to_string().green(),
            sell.rate.to_string().red()
        );
    }

    Ok(())
}
