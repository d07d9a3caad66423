//! Category display formatting

use crate::models::Category;

use super::helpers::{column_width, or_dash};

fn display_name(category: &Category) -> String {
    match &category.icon {
        Some(icon) => format!("{} {}", icon, category.name),
        None => category.name.clone(),
    }
}

fn kind(category: &Category) -> &'static str {
    if category.is_system() {
        "system"
    } else {
        "custom"
    }
}

/// Format visible categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'travex init' to create default categories."
            .to_string();
    }

    let names: Vec<String> = categories.iter().map(display_name).collect();
    let name_width = column_width(&names, 4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>5}  {:<7}  {}\n",
        "ID",
        "Name",
        "Order",
        "Color",
        "Kind",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->5}  {:-<7}  {:-<6}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (category, name) in categories.iter().zip(&names) {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>5}  {:<7}  {}\n",
            category.id.to_string(),
            name,
            category.sort_order,
            or_dash(category.color_hex.as_deref()),
            kind(category),
            name_width = name_width,
        ));
    }

    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:         {}\n", category.id));
    output.push_str(&format!("  Icon:       {}\n", or_dash(category.icon.as_deref())));
    output.push_str(&format!(
        "  Color:      {}\n",
        or_dash(category.color_hex.as_deref())
    ));
    output.push_str(&format!("  Sort Order: {}\n", category.sort_order));
    output.push_str(&format!("  Kind:       {}\n", kind(category)));

    output
}
