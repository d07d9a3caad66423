//! Travel summary display formatting
//!
//! Renders the per-category breakdown of a travel in both currencies, with
//! each category's share of the home-currency total.

use rust_decimal::Decimal;

use crate::models::format_amount;
use crate::summary::TravelSummary;

use super::helpers::{column_width, format_bar, format_percentage, or_dash, separator};

const BAR_WIDTH: usize = 20;

/// Format one travel summary with its category breakdown
pub fn format_summary(summary: &TravelSummary) -> String {
    let mut output = String::new();

    let header = format!("Travel Summary: {}", summary.name);
    output.push_str(&header);
    output.push('\n');
    output.push_str(&separator(header.chars().count().max(40)));
    output.push('\n');

    output.push_str(&format!(
        "Country: {}    Dates: {} to {}\n",
        or_dash(summary.country_code.as_deref()),
        or_dash(summary.start_date),
        or_dash(summary.end_date),
    ));
    output.push_str(&format!(
        "Rate:    1 {} = {} {}\n\n",
        summary.travel_currency_code,
        summary.travel_to_home_rate.normalize(),
        summary.home_currency_code
    ));

    if summary.categories.is_empty() {
        output.push_str("No expenses recorded.\n");
    } else {
        let name_width = column_width(summary.categories.iter().map(|c| c.name.as_str()), 8);
        let max_home = summary
            .categories
            .iter()
            .map(|c| c.total_home)
            .max()
            .unwrap_or(Decimal::ZERO);

        output.push_str(&format!(
            "{:<name_width$}  {:>16}  {:>16}  {:>8}\n",
            "Category",
            summary.travel_currency_code,
            summary.home_currency_code,
            "Share",
            name_width = name_width,
        ));
        output.push_str(&format!(
            "{:-<name_width$}  {:->16}  {:->16}  {:->8}\n",
            "",
            "",
            "",
            "",
            name_width = name_width,
        ));

        for category in &summary.categories {
            output.push_str(&format!(
                "{:<name_width$}  {:>16}  {:>16}  {:>8}  {}\n",
                category.name,
                format_amount(category.total_travel, &summary.travel_currency_code),
                format_amount(category.total_home, &summary.home_currency_code),
                format_percentage(category.percentage),
                format_bar(category.total_home, max_home, BAR_WIDTH),
                name_width = name_width,
            ));
        }

        output.push_str(&format!(
            "{:-<name_width$}  {:->16}  {:->16}\n",
            "",
            "",
            "",
            name_width = name_width,
        ));
        output.push_str(&format!(
            "{:<name_width$}  {:>16}  {:>16}\n",
            "Total",
            format_amount(summary.total_travel, &summary.travel_currency_code),
            format_amount(summary.total_home, &summary.home_currency_code),
            name_width = name_width,
        ));
    }

    if !summary.unresolved_currencies.is_empty() {
        output.push_str(&format!(
            "\nNo rate to {} for: {}\n",
            summary.home_currency_code,
            summary.unresolved_currencies.join(", ")
        ));
    }

    output
}

/// Format the totals of several travels, one row each
pub fn format_summary_list(summaries: &[TravelSummary]) -> String {
    if summaries.is_empty() {
        return "No travels found.".to_string();
    }

    let name_width = column_width(summaries.iter().map(|s| s.name.as_str()), 6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<10}  {:>18}  {:>18}  {:>10}\n",
        "Travel",
        "Start",
        "Spent",
        "Home total",
        "Categories",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<10}  {:->18}  {:->18}  {:->10}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<name_width$}  {:<10}  {:>18}  {:>18}  {:>10}\n",
            summary.name,
            or_dash(summary.start_date),
            format_amount(summary.total_travel, &summary.travel_currency_code),
            format_amount(summary.total_home, &summary.home_currency_code),
            summary.categories.len(),
            name_width = name_width,
        ));
    }

    output
}
