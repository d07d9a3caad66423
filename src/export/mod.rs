//! Export module for travel summaries
//!
//! - CSV: one row per travel category (spreadsheet-compatible)
//! - JSON: machine-readable summaries with schema version
//! - YAML: human-readable summaries

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;
use std::fmt;
use std::io::Write;

use crate::error::TravelResult;
use crate::models::UserId;
use crate::summary::TravelSummary;

pub use self::csv::export_summaries_csv;
pub use json::{export_summaries_json, SummaryExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_summaries_yaml;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
    /// CSV, one row per category
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Yaml => write!(f, "yaml"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Write a user's summaries in the requested format
pub fn export_summaries<W: Write>(
    user: &UserId,
    summaries: Vec<TravelSummary>,
    format: ExportFormat,
    writer: &mut W,
) -> TravelResult<()> {
    match format {
        ExportFormat::Csv => export_summaries_csv(&summaries, writer),
        ExportFormat::Json => {
            let export = SummaryExport::new(user.clone(), summaries);
            export_summaries_json(&export, writer, true)
        }
        ExportFormat::Yaml => {
            let export = SummaryExport::new(user.clone(), summaries);
            export_summaries_yaml(&export, writer)
        }
    }
}
