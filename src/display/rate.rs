//! Currency rate display formatting

use crate::models::{CurrencyRate, Travel};

/// Format a travel's rate rows as a table
pub fn format_rate_list(travel: &Travel, rates: &[CurrencyRate]) -> String {
    if rates.is_empty() {
        return format!("No currency rates for '{}'.", travel.name);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13}  {:<8}  {:>14}  {}\n",
        "ID",
        "Currency",
        format!("to {}", travel.home_currency_code),
        "Updated"
    ));
    output.push_str(&format!(
        "{:-<13}  {:-<8}  {:->14}  {:-<16}\n",
        "", "", "", ""
    ));

    for rate in rates {
        output.push_str(&format!(
            "{:<13}  {:<8}  {:>14}  {}\n",
            rate.id.to_string(),
            rate.currency_code,
            rate.rate_to_base.normalize().to_string(),
            rate.updated_at.format("%Y-%m-%d %H:%M"),
        ));
    }

    output
}

/// Format a single rate row
pub fn format_rate_details(travel: &Travel, rate: &CurrencyRate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Rate: {} -> {}\n", rate.currency_code, travel.home_currency_code));
    output.push_str(&format!("  ID:      {}\n", rate.id));
    output.push_str(&format!("  Travel:  {}\n", travel.name));
    output.push_str(&format!(
        "  Rate:    1 {} = {} {}\n",
        rate.currency_code,
        rate.rate_to_base.normalize(),
        travel.home_currency_code
    ));
    output.push_str(&format!(
        "  Updated: {}\n",
        rate.updated_at.format("%Y-%m-%d %H:%M")
    ));

    output
}
