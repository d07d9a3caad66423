//! Currency rate CLI commands
//!
//! Rates belong to a travel and convert one unit of a currency into the
//! travel's home currency. `lookup` queries the exchange rate source directly.

use clap::Subcommand;
use std::time::Duration;

use crate::config::Settings;
use crate::display::{format_rate_details, format_rate_list};
use crate::error::{TravelError, TravelResult};
use crate::models::{normalize_currency_code, UserId};
use crate::rates::{CachedRateProvider, FrankfurterSource, RateProvider, SnapshotOrigin};
use crate::services::{CurrencyRateService, TravelService};
use crate::storage::Storage;

use super::parse_decimal;

/// Rate subcommands
#[derive(Subcommand)]
pub enum RateCommands {
    /// List the rates of a travel
    List {
        /// Travel name or ID
        travel: String,
    },
    /// Show one rate
    Show {
        /// Travel name or ID
        travel: String,
        /// Currency code or rate ID
        rate: String,
    },
    /// Add a rate to a travel
    Add {
        /// Travel name or ID
        travel: String,
        /// Currency code (e.g. MAD)
        currency: String,
        /// Value of one unit in the home currency; looked up when omitted
        rate: Option<String>,
    },
    /// Edit a rate
    Edit {
        /// Travel name or ID
        travel: String,
        /// Currency code or rate ID
        rate: String,
        /// New currency code
        #[arg(short, long)]
        currency: Option<String>,
        /// New value in the home currency
        #[arg(long)]
        value: Option<String>,
    },
    /// Delete a rate
    Delete {
        /// Travel name or ID
        travel: String,
        /// Currency code or rate ID
        rate: String,
    },
    /// Look up a rate from the exchange rate source
    Lookup {
        /// Currency to convert from
        from: String,
        /// Currency to convert to (defaults to the configured home currency)
        to: Option<String>,
    },
}

/// Build the exchange rate provider described by the settings
pub fn rate_provider(settings: &Settings) -> TravelResult<CachedRateProvider<FrankfurterSource>> {
    let source = FrankfurterSource::new(
        settings.rates.api_base_url.clone(),
        Duration::from_secs(settings.rates.timeout_secs),
    )?;
    Ok(CachedRateProvider::new(source))
}

/// Handle a rate command
pub fn handle_rate_command(
    storage: &Storage,
    settings: &Settings,
    user: &UserId,
    cmd: RateCommands,
) -> TravelResult<()> {
    let travels = TravelService::new(storage, user);
    let service = CurrencyRateService::new(storage, user);

    match cmd {
        RateCommands::List { travel } => {
            let travel = travels.resolve(&travel)?;
            let rates = service.list(travel.id)?;
            print!("{}", format_rate_list(&travel, &rates));
        }

        RateCommands::Show { travel, rate } => {
            let travel = travels.resolve(&travel)?;
            let rate = service.resolve(travel.id, &rate)?;
            print!("{}", format_rate_details(&travel, &rate));
        }

        RateCommands::Add {
            travel,
            currency,
            rate,
        } => {
            let travel = travels.resolve(&travel)?;
            let currency = normalize_currency_code(&currency);

            let value = match rate {
                Some(rate) => parse_decimal(&rate, "rate")?,
                None => rate_provider(settings)?
                    .rate_between(&currency, &travel.home_currency_code)
                    .ok_or_else(|| {
                        TravelError::Rates(format!(
                            "No rate available from {} to {}",
                            currency, travel.home_currency_code
                        ))
                    })?,
            };

            let created = service.create(travel.id, &currency, value)?;
            println!(
                "Added rate to '{}': 1 {} = {} {}",
                travel.name,
                created.currency_code,
                created.rate_to_base.normalize(),
                travel.home_currency_code
            );
            println!("  ID: {}", created.id);
        }

        RateCommands::Edit {
            travel,
            rate,
            currency,
            value,
        } => {
            let travel = travels.resolve(&travel)?;
            let found = service.resolve(travel.id, &rate)?;

            if currency.is_none() && value.is_none() {
                println!("No changes specified. Use --currency or --value.");
                return Ok(());
            }

            let value = value
                .as_deref()
                .map(|v| parse_decimal(v, "rate"))
                .transpose()?;
            let updated = service.update(travel.id, found.id, currency.as_deref(), value)?;
            println!(
                "Updated rate: 1 {} = {} {}",
                updated.currency_code,
                updated.rate_to_base.normalize(),
                travel.home_currency_code
            );
        }

        RateCommands::Delete { travel, rate } => {
            let travel = travels.resolve(&travel)?;
            let found = service.resolve(travel.id, &rate)?;
            let deleted = service.delete(travel.id, found.id)?;
            println!(
                "Deleted rate for {} from '{}'",
                deleted.currency_code, travel.name
            );
        }

        RateCommands::Lookup { from, to } => {
            let from = normalize_currency_code(&from);
            let to = to.as_deref().unwrap_or(&settings.default_home_currency);
            let to = normalize_currency_code(to);

            let provider = rate_provider(settings)?;
            let value = provider.rate_between(&from, &to).ok_or_else(|| {
                TravelError::Rates(format!("No rate available from {} to {}", from, to))
            })?;

            println!("1 {} = {} {}", from, value.round_dp(6).normalize(), to);
            if let Some(snapshot) = provider.snapshot() {
                let origin = match snapshot.origin {
                    SnapshotOrigin::Remote => "exchange rate service",
                    SnapshotOrigin::Fallback => "built-in fallback table",
                };
                println!("  Source: {} ({})", origin, snapshot.taken_on);
            }
        }
    }

    Ok(())
}
