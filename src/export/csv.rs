//! CSV Export functionality
//!
//! Flattens summaries to one row per travel category.

use std::io::Write;

use crate::error::{TravelError, TravelResult};
use crate::summary::TravelSummary;

const HEADER: [&str; 10] = [
    "Travel ID",
    "Travel",
    "Start",
    "End",
    "Category",
    "Travel Currency",
    "Total Travel",
    "Home Currency",
    "Total Home",
    "Percentage",
];

/// Write category breakdowns of every summary as CSV
pub fn export_summaries_csv<W: Write>(summaries: &[TravelSummary], writer: W) -> TravelResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let to_export_error = |e: csv::Error| TravelError::Export(e.to_string());

    csv_writer.write_record(HEADER).map_err(to_export_error)?;

    for summary in summaries {
        let start = summary.start_date.map(|d| d.to_string()).unwrap_or_default();
        let end = summary.end_date.map(|d| d.to_string()).unwrap_or_default();

        for category in &summary.categories {
            csv_writer
                .write_record([
                    summary.travel_id.as_uuid().to_string(),
                    summary.name.clone(),
                    start.clone(),
                    end.clone(),
                    category.name.clone(),
                    summary.travel_currency_code.clone(),
                    category.total_travel.to_string(),
                    summary.home_currency_code.clone(),
                    category.total_home.to_string(),
                    category.percentage.to_string(),
                ])
                .map_err(to_export_error)?;
        }
    }

    csv_writer
        .flush()
        .map_err(|e| TravelError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TravelId};
    use crate::summary::CategoryBreakdown;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_csv_rows_per_category() {
        let summary = TravelSummary {
            travel_id: TravelId::new(),
            name: "Lisbon, Porto".into(),
            country_code: Some("PT".into()),
            home_currency_code: "USD".into(),
            travel_currency_code: "EUR".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            end_date: None,
            total_home: dec!(110),
            total_travel: dec!(100),
            travel_to_home_rate: dec!(1.1),
            categories: vec![
                CategoryBreakdown {
                    category_id: CategoryId::new(),
                    name: "Food".into(),
                    total_travel: dec!(60),
                    total_home: dec!(66),
                    percentage: dec!(60),
                },
                CategoryBreakdown {
                    category_id: CategoryId::new(),
                    name: "Transport".into(),
                    total_travel: dec!(40),
                    total_home: dec!(44),
                    percentage: dec!(40),
                },
            ],
            unresolved_currencies: vec![],
        };

        let mut buffer = Vec::new();
        export_summaries_csv(&[summary], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Travel ID,Travel,Start"));
        assert!(lines[1].contains("\"Lisbon, Porto\",2025-06-01,,Food,EUR,60,USD,66,60"));
        assert!(lines[2].contains("Transport"));
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let mut buffer = Vec::new();
        export_summaries_csv(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }
}
