//! CLI command for exporting travel summaries

use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{TravelError, TravelResult};
use crate::export::{export_summaries, ExportFormat};
use crate::models::UserId;
use crate::services::SummaryService;
use crate::storage::Storage;

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file (standard output when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    user: &UserId,
    args: ExportArgs,
) -> TravelResult<()> {
    let summaries = SummaryService::new(storage, user)
        .with_policy(settings.missing_rate_policy)
        .summaries()?;
    let count = summaries.len();

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                TravelError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export_summaries(user, summaries, args.format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| TravelError::Export(e.to_string()))?;
            println!(
                "Exported {} travel summaries as {} to: {}",
                count,
                args.format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            export_summaries(user, summaries, args.format, &mut handle)?;
        }
    }

    Ok(())
}
