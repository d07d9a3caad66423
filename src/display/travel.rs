//! Travel display formatting

use crate::models::{CurrencyRate, Travel};

use super::helpers::{column_width, or_dash};

/// Format a list of travels as a table
pub fn format_travel_list(travels: &[Travel]) -> String {
    if travels.is_empty() {
        return "No travels found.".to_string();
    }

    let name_width = column_width(travels.iter().map(|t| t.name.as_str()), 4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:<7}  {:<10}  {:<10}  {}\n",
        "ID",
        "Name",
        "Country",
        "Start",
        "End",
        "Currencies",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<7}  {:-<10}  {:-<10}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for travel in travels {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:<7}  {:<10}  {:<10}  {} -> {}\n",
            travel.id.to_string(),
            travel.name,
            or_dash(travel.country_code.as_deref()),
            or_dash(travel.start_date),
            or_dash(travel.end_date),
            travel.travel_currency_code,
            travel.home_currency_code,
            name_width = name_width,
        ));
    }

    output
}

/// Format a single travel with its rates
pub fn format_travel_details(travel: &Travel, rates: &[CurrencyRate]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Travel: {}\n", travel.name));
    output.push_str(&format!("  ID:              {}\n", travel.id));
    output.push_str(&format!(
        "  Country:         {}\n",
        or_dash(travel.country_code.as_deref())
    ));
    output.push_str(&format!("  Home currency:   {}\n", travel.home_currency_code));
    output.push_str(&format!("  Travel currency: {}\n", travel.travel_currency_code));
    output.push_str(&format!("  Start:           {}\n", or_dash(travel.start_date)));
    output.push_str(&format!("  End:             {}\n", or_dash(travel.end_date)));

    if !rates.is_empty() {
        output.push('\n');
        output.push_str("  Rates:\n");
        for rate in rates {
            output.push_str(&format!(
                "    1 {} = {} {}\n",
                rate.currency_code, rate.rate_to_base, travel.home_currency_code
            ));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created: {}\n",
        travel.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_travel_list(&[]), "No travels found.");
    }

    #[test]
    fn test_list_row() {
        let travel = Travel::new(UserId::new("alice"), "Morocco", "EUR", "MAD")
            .with_country("MA")
            .with_dates(NaiveDate::from_ymd_opt(2025, 4, 1), None);
        let output = format_travel_list(&[travel.clone()]);

        assert!(output.contains("Morocco"));
        assert!(output.contains("2025-04-01"));
        assert!(output.contains("MAD -> EUR"));
        assert!(output.contains(&travel.id.to_string()));
    }

    #[test]
    fn test_details_include_rates() {
        let travel = Travel::new(UserId::new("alice"), "Morocco", "EUR", "MAD");
        let rates = vec![CurrencyRate::new(travel.id, "MAD", dec!(0.093))];
        let output = format_travel_details(&travel, &rates);

        assert!(output.contains("Travel: Morocco"));
        assert!(output.contains("Country:         -"));
        assert!(output.contains("1 MAD = 0.093 EUR"));
    }
}
