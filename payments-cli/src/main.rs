//! Payments CLI
//!
//! Command-line interface for the Payments API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use payments_client::{ClientError, PaymentsClient};
use payments_types::Currency;

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payments API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Payments API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new payment
    Create {
        #[arg(long)]
        amount: f64,
        /// Currency (USD, AUD, EUR, GBP, SGD)
        #[arg(long, default_value = "USD", value_parser = parse_currency)]
        currency: Currency,
    },
    /// Get payment details
    Get {
        /// Payment ID
        id: String,
    },
    /// List payments, newest first
    List {
        /// Only show payments in this currency
        #[arg(long, value_parser = parse_currency)]
        currency: Option<Currency>,
    },
    /// Check API health
    Health,
}

fn parse_currency(s: &str) -> std::result::Result<Currency, String> {
    s.to_uppercase().parse().map_err(|_| {
        format!(
            "unknown currency: {}. Supported: {}",
            s,
            Currency::allowed_codes()
        )
    })
}

async fn run(cli: Cli) -> Result<()> {
    let client = PaymentsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Create { amount, currency } => {
            let created = client.create_payment(amount, currency).await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }

        Commands::Get { id } => {
            let payment = client.get_payment(&id).await?;
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }

        Commands::List { currency } => {
            let list = client.list_payments(currency).await?;
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        if let Some(ClientError::Api { details, .. }) = err.downcast_ref::<ClientError>() {
            eprintln!("✗ {}", err);
            for detail in details {
                eprintln!("  - {}", detail);
            }
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_is_case_insensitive() {
        assert_eq!(parse_currency("sgd").unwrap(), Currency::SGD);
        assert_eq!(parse_currency("EUR").unwrap(), Currency::EUR);
        assert!(parse_currency("INR").unwrap_err().contains("USD, AUD, EUR, GBP, SGD"));
    }

    #[test]
    fn test_create_command() {
        let cli = Cli::try_parse_from(["payments", "create", "--amount", "12.5", "--currency", "gbp"])
            .unwrap();
        match cli.command {
            Commands::Create { amount, currency } => {
                assert_eq!(amount, 12.5);
                assert_eq!(currency, Currency::GBP);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_list_command_without_filter() {
        let cli = Cli::try_parse_from(["payments", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List { currency: None }));
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        assert!(Cli::try_parse_from(["payments", "list", "--currency", "XXX"]).is_err());
    }
}
