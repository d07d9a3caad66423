//! YAML Export functionality

use std::io::Write;

use crate::error::{TravelError, TravelResult};
use crate::export::json::SummaryExport;

/// Write an export as YAML with a short header comment
pub fn export_summaries_yaml<W: Write>(export: &SummaryExport, writer: &mut W) -> TravelResult<()> {
    let header = format!(
        "# Travel expense summaries\n# Generated: {}\n# User: {}\n\n",
        export.exported_at, export.user_id
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| TravelError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| TravelError::Export(e.to_string()))?;

    Ok(())
}
