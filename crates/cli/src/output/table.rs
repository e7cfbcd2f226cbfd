//! Human-readable report tables

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use mpc_core::{DeletionOutcome, SweepSummary, UploadRecord};

/// Keys wider than this many display columns are truncated
const KEY_WIDTH: usize = 120;

fn format_size(size: u64) -> String {
    humansize::format_size(size, humansize::BINARY)
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
}

fn new_table(colors: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled);
    if !colors {
        table.force_no_tty();
    }
    table
}

fn status(record: &UploadRecord) -> (&'static str, Color) {
    match (record.deletion_outcome, record.eligible_for_deletion) {
        (DeletionOutcome::Succeeded, _) => ("✅ Deleted", Color::Green),
        (DeletionOutcome::Failed, _) => ("❌ Delete failed", Color::DarkRed),
        (DeletionOutcome::NotAttempted, true) => ("🎯 Will delete", Color::Red),
        (DeletionOutcome::NotAttempted, false) => ("🔍 Won't delete", Color::Yellow),
    }
}

/// One row per upload with its status
pub fn render_upload_table(records: &[UploadRecord], colors: bool) -> String {
    let mut table = new_table(colors);
    table.set_header(vec![
        header_cell("Bucket"),
        header_cell("Key"),
        header_cell("Size"),
        header_cell("Mod Time"),
        header_cell("Status"),
    ]);

    for record in records {
        let (status, status_color) = status(record);
        let time_color = if record.eligible_for_deletion {
            Color::Red
        } else {
            Color::Yellow
        };

        table.add_row(vec![
            Cell::new(&record.bucket).fg(Color::Blue),
            Cell::new(console::truncate_str(&record.key, KEY_WIDTH, "...")),
            Cell::new(format_size(record.size)).fg(Color::Cyan),
            Cell::new(record.started_at.strftime("%Y-%m-%d %H:%M:%S")).fg(time_color),
            Cell::new(status).fg(status_color),
        ]);
    }

    table.to_string()
}

/// Aggregate statistics block printed after the upload table
pub fn render_summary_table(summary: &SweepSummary, colors: bool) -> String {
    let mut table = new_table(colors);
    table.set_header(vec![header_cell("Statistics"), header_cell("Value")]);

    let rows = [
        ("Total files", summary.total_files.to_string()),
        ("Total size", format_size(summary.total_size)),
        ("Files to delete", summary.eligible_files.to_string()),
        ("Size to delete", format_size(summary.eligible_size)),
        ("Files deleted", summary.deleted_files.to_string()),
        ("Size deleted", format_size(summary.deleted_size)),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn record(key: &str, size: u64, eligible: bool, outcome: DeletionOutcome) -> UploadRecord {
        UploadRecord {
            bucket: "logs".to_string(),
            key: key.to_string(),
            upload_id: "id".to_string(),
            size,
            started_at: Timestamp::from_second(1_700_000_000).unwrap(),
            eligible_for_deletion: eligible,
            deletion_outcome: outcome,
        }
    }

    #[test]
    fn test_upload_table_rows() {
        let records = vec![
            record("a.bin", 1024, true, DeletionOutcome::NotAttempted),
            record("b.bin", 0, false, DeletionOutcome::NotAttempted),
            record("c.bin", 2048, true, DeletionOutcome::Succeeded),
            record("d.bin", 10, true, DeletionOutcome::Failed),
        ];
        let out = render_upload_table(&records, false);

        assert!(out.contains("Bucket"));
        assert!(out.contains("2023-11-14 22:13:20"));
        assert!(out.contains("1 KiB"));
        assert!(out.contains("🎯 Will delete"));
        assert!(out.contains("🔍 Won't delete"));
        assert!(out.contains("✅ Deleted"));
        assert!(out.contains("❌ Delete failed"));
        assert!(!out.contains("\x1b["));
    }

    #[test]
    fn test_long_keys_are_truncated() {
        let key = "k".repeat(300);
        let out = render_upload_table(&[record(&key, 1, false, DeletionOutcome::NotAttempted)], false);
        assert!(!out.contains(&key));
        assert!(out.contains(&format!("{}...", "k".repeat(KEY_WIDTH - 3))));
    }

    #[test]
    fn test_summary_table() {
        let summary = SweepSummary {
            total_files: 3,
            total_size: 3 * 1024 * 1024,
            eligible_files: 2,
            eligible_size: 2 * 1024 * 1024,
            deleted_files: 1,
            deleted_size: 1024 * 1024,
        };
        let out = render_summary_table(&summary, false);
        assert!(out.contains("Total files"));
        assert!(out.contains("3 MiB"));
        assert!(out.contains("Files to delete"));
        assert!(out.contains("Size deleted"));
        assert!(out.contains("1 MiB"));
    }
}
