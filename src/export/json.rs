//! JSON Export functionality
//!
//! Exports travel summaries to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{TravelError, TravelResult};
use crate::models::UserId;
use crate::summary::TravelSummary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Summary export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Owner of the exported travels
    pub user_id: UserId,

    /// One summary per travel
    pub travels: Vec<TravelSummary>,
}

impl SummaryExport {
    pub fn new(user_id: UserId, travels: Vec<TravelSummary>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id,
            travels,
        }
    }
}

/// Write an export as JSON
pub fn export_summaries_json<W: Write>(
    export: &SummaryExport,
    writer: &mut W,
    pretty: bool,
) -> TravelResult<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    };
    written.map_err(|e| TravelError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| TravelError::Export(e.to_string()))?;
    Ok(())
}
