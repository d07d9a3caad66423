//! Expense CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{TravelError, TravelResult};
use crate::models::UserId;
use crate::services::{CategoryService, ExpenseChanges, ExpenseService, NewExpense, TravelService};
use crate::storage::Storage;
use crate::summary::UNKNOWN_CATEGORY_NAME;

use super::{clearable, parse_date, parse_decimal};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses
    List {
        /// Only expenses of this travel (name or ID)
        #[arg(short, long)]
        travel: Option<String>,
    },
    /// Show expense details
    Show {
        /// Expense ID
        expense: String,
    },
    /// Record an expense
    Add {
        /// Travel name or ID
        travel: String,
        /// What was paid for
        name: String,
        /// Amount (e.g. "1250.50")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Currency code (defaults to the travel currency)
        #[arg(long)]
        currency: Option<String>,
        /// Free-text notes
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        expense: String,
        /// Move to another travel (name or ID)
        #[arg(short, long)]
        travel: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New currency code
        #[arg(long)]
        currency: Option<String>,
        /// New notes (empty to clear)
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    user: &UserId,
    cmd: ExpenseCommands,
) -> TravelResult<()> {
    let service = ExpenseService::new(storage, user);
    let travels = TravelService::new(storage, user);
    let categories = CategoryService::new(storage, user);

    match cmd {
        ExpenseCommands::List { travel } => {
            let expenses = match travel {
                Some(travel) => service.list_for_travel(travels.resolve(&travel)?.id)?,
                None => service.list_all()?,
            };
            print!("{}", format_expense_list(&expenses, &categories.names()?));
        }

        ExpenseCommands::Show { expense } => {
            let found = service
                .find(&expense, None)?
                .ok_or_else(|| TravelError::expense_not_found(&expense))?;

            let travel = travels.get(found.travel_id)?;
            let names = categories.names()?;
            let category = names
                .get(&found.category_id)
                .map(String::as_str)
                .unwrap_or(UNKNOWN_CATEGORY_NAME);
            print!("{}", format_expense_details(&found, category, &travel.name));
        }

        ExpenseCommands::Add {
            travel,
            name,
            amount,
            category,
            date,
            currency,
            description,
        } => {
            let travel = travels.resolve(&travel)?;
            let category = categories.resolve(&category)?;
            let date = match date {
                Some(date) => parse_date(&date, settings)?,
                None => Local::now().date_naive(),
            };

            let expense = service.create(NewExpense {
                travel_id: travel.id,
                category_id: category.id,
                date,
                name,
                amount: parse_decimal(&amount, "amount")?,
                currency_code: currency,
                description,
            })?;

            println!("Added expense: {}", expense.name);
            println!("  Travel:   {}", travel.name);
            println!("  Category: {}", category.name);
            println!("  Amount:   {} {}", expense.amount, expense.currency_code);
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::Edit {
            expense,
            travel,
            category,
            date,
            name,
            amount,
            currency,
            description,
        } => {
            let found = service
                .find(&expense, None)?
                .ok_or_else(|| TravelError::expense_not_found(&expense))?;

            let changes = ExpenseChanges {
                travel_id: travel.map(|t| travels.resolve(&t)).transpose()?.map(|t| t.id),
                category_id: category
                    .map(|c| categories.resolve(&c))
                    .transpose()?
                    .map(|c| c.id),
                date: date.map(|d| parse_date(&d, settings)).transpose()?,
                name,
                amount: amount.map(|a| parse_decimal(&a, "amount")).transpose()?,
                currency_code: currency,
                description: clearable(description),
            };

            if changes.travel_id.is_none()
                && changes.category_id.is_none()
                && changes.date.is_none()
                && changes.name.is_none()
                && changes.amount.is_none()
                && changes.currency_code.is_none()
                && changes.description.is_none()
            {
                println!("No changes specified. Use --help to see the editable fields.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated expense: {}", updated.name);
        }

        ExpenseCommands::Delete { expense } => {
            let found = service
                .find(&expense, None)?
                .ok_or_else(|| TravelError::expense_not_found(&expense))?;
            let deleted = service.delete(found.id)?;
            println!("Deleted expense: {}", deleted.name);
        }
    }

    Ok(())
}
