//! Travel CLI commands
//!
//! Implements CLI commands for travel management and travel summaries.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_summary, format_summary_list, format_travel_details, format_travel_list,
};
use crate::error::TravelResult;
use crate::models::UserId;
use crate::rates::RateProvider;
use crate::services::{CurrencyRateService, NewTravel, SummaryService, TravelChanges, TravelService};
use crate::storage::Storage;
use crate::summary::MissingRatePolicy;

use super::rate::rate_provider;
use super::{clearable, clearable_date, parse_date};

/// Travel subcommands
#[derive(Subcommand)]
pub enum TravelCommands {
    /// List your travels
    List,
    /// Show travel details
    Show {
        /// Travel name or ID
        travel: String,
    },
    /// Create a new travel
    Create {
        /// Travel name
        name: String,
        /// Currency spent on the trip (e.g. MAD)
        #[arg(short, long)]
        currency: String,
        /// Home currency (defaults to the configured one)
        #[arg(long)]
        home: Option<String>,
        /// Destination country code (e.g. MA)
        #[arg(long)]
        country: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Don't look up an exchange rate for the travel currency
        #[arg(long)]
        no_rate: bool,
    },
    /// Edit a travel
    Edit {
        /// Travel name or ID
        travel: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New travel currency
        #[arg(short, long)]
        currency: Option<String>,
        /// New home currency
        #[arg(long)]
        home: Option<String>,
        /// New country code (empty to clear)
        #[arg(long)]
        country: Option<String>,
        /// New start date (empty to clear)
        #[arg(long)]
        start: Option<String>,
        /// New end date (empty to clear)
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete a travel with its expenses and rates
    Delete {
        /// Travel name or ID
        travel: String,
    },
    /// Spending summary of a travel by category
    Summary {
        /// Travel name or ID
        travel: String,
        /// Leave out expenses in currencies without a rate
        #[arg(long)]
        exclude_unrated: bool,
    },
    /// Totals of all your travels
    Summaries,
}

/// Handle a travel command
pub fn handle_travel_command(
    storage: &Storage,
    settings: &Settings,
    user: &UserId,
    cmd: TravelCommands,
) -> TravelResult<()> {
    let service = TravelService::new(storage, user);

    match cmd {
        TravelCommands::List => {
            let travels = service.list()?;
            print!("{}", format_travel_list(&travels));
        }

        TravelCommands::Show { travel } => {
            let found = service.resolve(&travel)?;
            let rates = CurrencyRateService::new(storage, user).list(found.id)?;
            print!("{}", format_travel_details(&found, &rates));
        }

        TravelCommands::Create {
            name,
            currency,
            home,
            country,
            start,
            end,
            no_rate,
        } => {
            let input = NewTravel {
                name,
                country_code: country,
                home_currency_code: home.unwrap_or_else(|| settings.default_home_currency.clone()),
                travel_currency_code: currency,
                start_date: start.as_deref().map(|d| parse_date(d, settings)).transpose()?,
                end_date: end.as_deref().map(|d| parse_date(d, settings)).transpose()?,
            };

            let provider = if no_rate || !settings.rates.fetch_on_create {
                None
            } else {
                Some(rate_provider(settings)?)
            };
            let (travel, seeded) = service.create(
                input,
                provider.as_ref().map(|p| p as &dyn RateProvider),
            )?;

            println!("Created travel: {}", travel.name);
            println!(
                "  Currencies: {} -> {}",
                travel.travel_currency_code, travel.home_currency_code
            );
            if let Some(rate) = seeded {
                println!(
                    "  Rate: 1 {} = {} {}",
                    rate.currency_code,
                    rate.rate_to_base.round_dp(6).normalize(),
                    travel.home_currency_code
                );
            }
            println!("  ID: {}", travel.id);
        }

        TravelCommands::Edit {
            travel,
            name,
            currency,
            home,
            country,
            start,
            end,
        } => {
            let found = service.resolve(&travel)?;

            let changes = TravelChanges {
                name,
                country_code: clearable(country),
                home_currency_code: home,
                travel_currency_code: currency,
                start_date: clearable_date(start, settings)?,
                end_date: clearable_date(end, settings)?,
            };

            if changes.name.is_none()
                && changes.country_code.is_none()
                && changes.home_currency_code.is_none()
                && changes.travel_currency_code.is_none()
                && changes.start_date.is_none()
                && changes.end_date.is_none()
            {
                println!("No changes specified. Use --help to see the editable fields.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated travel: {}", updated.name);
        }

        TravelCommands::Delete { travel } => {
            let found = service.resolve(&travel)?;
            let deleted = service.delete(found.id)?;
            println!(
                "Deleted travel '{}' ({} expenses, {} rates)",
                deleted.travel.name, deleted.expenses, deleted.rates
            );
        }

        TravelCommands::Summary {
            travel,
            exclude_unrated,
        } => {
            let found = service.resolve(&travel)?;
            let policy = if exclude_unrated {
                MissingRatePolicy::Exclude
            } else {
                settings.missing_rate_policy
            };
            let summary = SummaryService::new(storage, user)
                .with_policy(policy)
                .summary(found.id)?;
            print!("{}", format_summary(&summary));
        }

        TravelCommands::Summaries => {
            let summaries = SummaryService::new(storage, user)
                .with_policy(settings.missing_rate_policy)
                .summaries()?;
            print!("{}", format_summary_list(&summaries));
        }
    }

    Ok(())
}
