//! Category CLI commands
//!
//! System categories are shared by everyone; custom ones belong to the user
//! who created them.

use clap::Subcommand;

use crate::display::{format_category_details, format_category_list};
use crate::error::TravelResult;
use crate::models::UserId;
use crate::services::{CategoryChanges, CategoryService, NewCategory};
use crate::storage::Storage;

use super::clearable;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List system and custom categories
    List,
    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
    /// Create a custom category
    Create {
        /// Category name
        name: String,
        /// Icon shown next to the name
        #[arg(short, long)]
        icon: Option<String>,
        /// Color as hex (e.g. #3366CC)
        #[arg(long)]
        color: Option<String>,
        /// Position in listings
        #[arg(long)]
        order: Option<i32>,
    },
    /// Edit a custom category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New icon (empty to clear)
        #[arg(short, long)]
        icon: Option<String>,
        /// New color (empty to clear)
        #[arg(long)]
        color: Option<String>,
        /// New position
        #[arg(long)]
        order: Option<i32>,
    },
    /// Delete a custom category without expenses
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    user: &UserId,
    cmd: CategoryCommands,
) -> TravelResult<()> {
    let service = CategoryService::new(storage, user);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Show { category } => {
            let found = service.resolve(&category)?;
            print!("{}", format_category_details(&found));
        }

        CategoryCommands::Create {
            name,
            icon,
            color,
            order,
        } => {
            let category = service.create(NewCategory {
                name,
                icon,
                color_hex: color,
                sort_order: order,
            })?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Edit {
            category,
            name,
            icon,
            color,
            order,
        } => {
            let found = service.resolve(&category)?;

            if name.is_none() && icon.is_none() && color.is_none() && order.is_none() {
                println!("No changes specified. Use --name, --icon, --color or --order.");
                return Ok(());
            }

            let updated = service.update(
                found.id,
                CategoryChanges {
                    name,
                    icon: clearable(icon),
                    color_hex: clearable(color),
                    sort_order: order,
                },
            )?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let found = service.resolve(&category)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
