//! Spreadsheet export
//!
//! Serializes analysis records to CSV for the dashboard's export button
//! and the `adboard export` command. One row per record; tags are joined
//! with `;` so the row stays flat.

use anyhow::{Context, Result};
use std::path::Path;

use crate::types::AnalysisRecord;

/// Column order for the exported sheet
const HEADER: [&str; 7] = [
    "id",
    "object_name",
    "label",
    "confidence",
    "advertiser",
    "tags",
    "created_at",
];

/// Serialize records to CSV bytes
pub fn to_csv(records: &[AnalysisRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .context("Failed to write CSV header")?;

    for record in records {
        let confidence = format!("{:.4}", record.confidence);
        let tags = record.tags.join(";");
        let created_at = record.created_at.to_rfc3339();
        writer
            .write_record([
                record.id.as_str(),
                record.object_name.as_str(),
                record.label.as_str(),
                confidence.as_str(),
                record.advertiser.as_deref().unwrap_or(""),
                tags.as_str(),
                created_at.as_str(),
            ])
            .with_context(|| format!("Failed to write CSV row for record {}", record.id))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e.error()))
}

/// Write records to a CSV file on disk
pub fn write_csv_file(records: &[AnalysisRecord], path: &Path) -> Result<()> {
    let data = to_csv(records)?;
    std::fs::write(path, data)
        .with_context(|| format!("Failed to write CSV file {}", path.display()))?;
    Ok(())
}
