use bittrex::core::config::ExchangeConfig;
use bittrex::core::traits::{AccountInfo, PublicData};
use bittrex::{build_connector, build_public_connector};
use tracing_subscriber::EnvFilter;

/// Print 24h summaries for the markets given on the command line (all
/// markets when none are given), plus balances when credentials are set in
/// `BITTREX_API_KEY` / `BITTREX_SECRET_KEY`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let markets: Vec<String> = std::env::args().skip(1).collect();
    let markets: Vec<&str> = markets.iter().map(String::as_str).collect();

    let public = build_public_connector(ExchangeConfig::read_only())?;
    let summaries = public.get_market_summaries(&markets).await?;
    for summary in summaries.iter().take(20) {
        println!(
            "{:<12} last {:>16} bid {:>16} ask {:>16} vol {}",
            summary.market_name, summary.last, summary.bid, summary.ask, summary.volume
        );
    }
    println!("{} markets", summaries.len());

    if let Ok(config) = ExchangeConfig::from_env("BITTREX") {
        let connector = build_connector(config)?;
        for balance in connector.get_balances(&[]).await? {
            if !balance.balance.is_zero() {
                println!("{:<6} {}", balance.currency, balance.balance);
            }
        }
    }

    Ok(())
}
