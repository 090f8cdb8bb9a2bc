//! JSON and CSV writers.

use super::{ExportBundle, TransferError, EXPORT_SCHEMA_VERSION};
use crate::model::category::resolve_display;
use crate::repo::store::StoreSnapshot;
use crate::time::{reference_date, to_reference_datetime};
use chrono::SecondsFormat;

/// CSV header row, one column per exported task attribute.
pub const CSV_HEADER: [&str; 5] = ["Title", "Category", "Time Block", "Status", "Completed At"];

const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Writes the full store as a pretty-printed, versioned JSON bundle.
pub fn export_json(snapshot: &StoreSnapshot, now_ms: i64) -> Result<String, TransferError> {
    let bundle = ExportBundle {
        version: EXPORT_SCHEMA_VERSION,
        exported_at: to_reference_datetime(now_ms).to_rfc3339_opts(SecondsFormat::Millis, false),
        categories: snapshot.categories.clone(),
        tasks: snapshot.tasks.clone(),
        notes: snapshot.notes.clone(),
    };
    Ok(serde_json::to_string_pretty(&bundle)?)
}

/// Writes tasks as a flat table. Orphaned tasks show "Special Order".
pub fn export_csv(snapshot: &StoreSnapshot) -> Result<String, TransferError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for task in &snapshot.tasks {
        let category = resolve_display(&snapshot.categories, task.category_id);
        let completed_at = task
            .completed_at
            .map(|at| {
                to_reference_datetime(at)
                    .format(CSV_TIMESTAMP_FORMAT)
                    .to_string()
            })
            .unwrap_or_default();
        writer.write_record([
            task.title.as_str(),
            category.label,
            task.time_block.label(),
            task.status.label(),
            completed_at.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| TransferError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Suggested download name, e.g. `cafe-planner-2024-03-10.json`.
pub fn export_file_name(format: ExportFormat, now_ms: i64) -> String {
    format!(
        "cafe-planner-{}.{}",
        reference_date(now_ms).format("%Y-%m-%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::{export_csv, export_file_name, export_json, ExportFormat};
    use crate::model::category::Category;
    use crate::model::task::{Task, TimeBlock};
    use crate::model::theme::Theme;
    use crate::repo::store::StoreSnapshot;
    use uuid::Uuid;

    // 2024-03-10T13:53:20+08:00
    const NOW_MS: i64 = 1_710_050_000_000;

    #[test]
    fn csv_has_header_labels_and_special_order_fallback() {
        let coffee = Category::new("Coffee", "☕", Theme::Mocha);
        let mut brewed = Task::new("brew, then pour", coffee.id, TimeBlock::Morning, 0);
        brewed.complete(NOW_MS);
        let orphan = Task::new("mystery", Uuid::new_v4(), TimeBlock::Evening, 0);
        let snapshot = StoreSnapshot {
            categories: vec![coffee],
            tasks: vec![brewed, orphan],
            notes: Vec::new(),
        };

        let csv = export_csv(&snapshot).unwrap();
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Title,Category,Time Block,Status,Completed At");
        assert_eq!(
            lines[1],
            "\"brew, then pour\",Coffee,Morning,Completed,2024-03-10 13:53"
        );
        assert_eq!(lines[2], "mystery,Special Order,Evening,Active,");
    }

    #[test]
    fn json_carries_version_and_reference_timestamp() {
        let json = export_json(&StoreSnapshot::default(), NOW_MS).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["exportedAt"], "2024-03-10T13:53:20.000+08:00");
        assert!(value["categories"].as_array().unwrap().is_empty());
        assert!(value["tasks"].is_array());
        assert!(value["notes"].is_array());
    }

    #[test]
    fn file_name_uses_reference_date() {
        assert_eq!(
            export_file_name(ExportFormat::Csv, NOW_MS),
            "cafe-planner-2024-03-10.csv"
        );
    }
}
