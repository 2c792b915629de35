//! Presentation: snapshot tables and configuration output.

use crate::config::DocviewConfig;
use crate::error::DocviewError;
use crate::snapshot::{EntityStatus, ResultSnapshot};
use comfy_table::Table;
use owo_colors::OwoColorize;

fn status_cell(status: &EntityStatus, color: bool) -> String {
    if !color {
        return status.to_string();
    }
    match status {
        EntityStatus::Pending => status.yellow().to_string(),
        EntityStatus::Success => status.green().to_string(),
        EntityStatus::Failure => status.red().to_string(),
        EntityStatus::Other(_) => status.dimmed().to_string(),
    }
}

/// Render a snapshot as a table with a total line and the export link, if any.
pub fn format_snapshot_table(snapshot: &ResultSnapshot, color: bool) -> String {
    let total = snapshot
        .total()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let mut s = format!(
        "Total: {} (showing {})",
        total,
        snapshot.visible_count()
    );
    if snapshot.has_pending() {
        s.push_str("\nDocuments are being processed. Please wait...");
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["ID", "Name", "Schema", "Status"]);
    for record in snapshot.results() {
        table.add_row(vec![
            record.id.to_string(),
            record.name.clone().unwrap_or_else(|| "-".to_string()),
            record.schema.clone().unwrap_or_else(|| "-".to_string()),
            status_cell(&record.status, color),
        ]);
    }
    s.push('\n');
    s.push_str(&table.to_string());

    if let Some(link) = snapshot.export_link() {
        s.push_str(&format!("\nExport: {}", link));
    }
    s
}

pub fn format_watch_summary(executions: usize, snapshots_shown: usize, settled: bool) -> String {
    if settled {
        format!(
            "All documents processed after {} executions ({} snapshots shown)",
            executions, snapshots_shown
        )
    } else {
        format!(
            "Stopped waiting with documents still pending after {} executions",
            executions
        )
    }
}

pub fn format_config_json(config: &DocviewConfig) -> Result<String, DocviewError> {
    serde_json::to_string_pretty(config).map_err(|e| DocviewError::ConfigError(e.to_string()))
}
