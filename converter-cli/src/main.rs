//! Converter CLI
//!
//! Command-line collaborator for the conversion service. Wires together
//! the HTTP client, the conversion service and tracing, and maps each
//! public operation onto a subcommand.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use converter_client::ExchangeRateClient;
use converter_core::ConversionService;
use converter_types::{CurrencyCode, Freshness};

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency converter CLI", long_about = None)]
struct Cli {
    /// Base URL of the exchange-rate provider
    #[arg(
        long,
        env = "EXCHANGE_RATE_API_URL",
        default_value = "https://v6.exchangerate-api.com/v6"
    )]
    api_url: String,

    /// API key for the exchange-rate provider
    #[arg(long, env = "EXCHANGE_RATE_API_KEY", hide_env_values = true)]
    api_key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Source currency code (e.g. USD)
        from: String,
        /// Target currency code (e.g. EUR)
        to: String,
        /// Amount to convert
        amount: String,
    },
    /// List all supported currencies
    Currencies,
    /// Show the latest rates against a base currency
    Rates {
        /// Base currency code
        base: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,converter_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let client = Arc::new(ExchangeRateClient::new(cli.api_url, cli.api_key));
    let service = ConversionService::new(client);

    match cli.command {
        Commands::Convert { from, to, amount } => {
            match service.convert_input(&from, &to, &amount).await {
                Ok(Some(conversion)) => {
                    println!("{:.4}", conversion.amount);
                    if let Freshness::CachedFallback { as_of } = conversion.freshness {
                        println!("(cached rate from {as_of})");
                    }
                }
                // Blank or malformed input converts to nothing, not an error.
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!("conversion failed: {err}");
                    anyhow::bail!("{}", err.user_message());
                }
            }
        }
        Commands::Currencies => {
            let currencies = service.all_currencies().await?;
            for currency in &currencies {
                println!("{}  {}", currency.code, currency.name);
            }
        }
        Commands::Rates { base } => {
            let base: CurrencyCode = base.parse()?;
            let rates = service.latest_rates(base).await?;

            let mut sorted: Vec<_> = rates.into_iter().collect();
            sorted.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
            for (code, rate) in sorted {
                println!("{code}  {rate}");
            }
        }
    }

    Ok(())
}
