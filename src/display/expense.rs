//! Expense display formatting

use std::collections::HashMap;

use crate::models::{format_amount, CategoryId, Expense};
use crate::summary::UNKNOWN_CATEGORY_NAME;

use super::helpers::{column_width, truncate};

fn category_name<'a>(names: &'a HashMap<CategoryId, String>, id: &CategoryId) -> &'a str {
    names
        .get(id)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_CATEGORY_NAME)
}

/// Format expenses as a register
pub fn format_expense_list(
    expenses: &[Expense],
    categories: &HashMap<CategoryId, String>,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let name_width = column_width(expenses.iter().map(|e| truncate(&e.name, 30)), 4);
    let category_width = column_width(
        expenses
            .iter()
            .map(|e| category_name(categories, &e.category_id)),
        8,
    );

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<name_width$}  {:<category_width$}  {:>16}\n",
        "ID",
        "Date",
        "Name",
        "Category",
        "Amount",
        name_width = name_width,
        category_width = category_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<name_width$}  {:-<category_width$}  {:->16}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        category_width = category_width,
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<name_width$}  {:<category_width$}  {:>16}\n",
            expense.id.to_string(),
            expense.date,
            truncate(&expense.name, 30),
            category_name(categories, &expense.category_id),
            format_amount(expense.amount, &expense.currency_code),
            name_width = name_width,
            category_width = category_width,
        ));
    }

    output
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, category: &str, travel: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.name));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!("  Travel:   {}\n", travel));
    output.push_str(&format!("  Category: {}\n", category));
    output.push_str(&format!("  Date:     {}\n", expense.date));
    output.push_str(&format!(
        "  Amount:   {}\n",
        format_amount(expense.amount, &expense.currency_code)
    ));
    if let Some(description) = &expense.description {
        output.push_str(&format!("  Notes:    {}\n", description));
    }

    output
}
