use std::fs;

use tempfile::tempdir;

use workspace_metrics::export::{export_file, ExportFormat};
use workspace_metrics::models::{ExportRow, EXPORT_HEADERS};

fn sample_rows() -> Vec<ExportRow> {
    vec![
        ExportRow {
            workspace_name: "Huddle 1".to_string(),
            floor_number: 3,
            capacity: Some(4),
            metric_name: "duration".to_string(),
            start: "2024-03-10T10:00:00Z".to_string(),
            end: "2024-03-10T11:00:00Z".to_string(),
            duration: Some(600.0),
            mean: None,
            min: None,
            max: None,
        },
        ExportRow {
            workspace_name: "Huddle 1".to_string(),
            floor_number: 3,
            capacity: Some(4),
            metric_name: "temperature".to_string(),
            start: "2024-03-10T10:00:00Z".to_string(),
            end: "2024-03-10T11:00:00Z".to_string(),
            duration: None,
            mean: Some(21.5),
            min: Some(20.0),
            max: Some(23.0),
        },
    ]
}

#[test]
fn test_json_round_trip_preserves_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.json");
    let rows = sample_rows();

    export_file(&rows, ExportFormat::Json, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let reloaded: Vec<ExportRow> = serde_json::from_str(&content).unwrap();
    assert_eq!(reloaded, rows);
}

#[test]
fn test_json_empty_rows_is_empty_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.json");

    export_file(&[], ExportFormat::Json, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let reloaded: Vec<ExportRow> = serde_json::from_str(&content).unwrap();
    assert!(reloaded.is_empty());
}

#[test]
fn test_csv_header_and_row_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let rows = sample_rows();

    export_file(&rows, ExportFormat::Csv, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), rows.len() + 1);
    assert_eq!(lines[0], EXPORT_HEADERS.join(","));
    assert!(lines[1].contains("duration"));
    assert!(lines[1].contains("N/A"));
    assert!(lines[2].contains("21.5"));
}

#[test]
fn test_csv_empty_rows_is_header_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");

    export_file(&[], ExportFormat::Csv, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], EXPORT_HEADERS.join(","));
}

#[test]
fn test_xlsx_file_is_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xlsx");

    export_file(&sample_rows(), ExportFormat::Xlsx, &path).unwrap();

    let metadata = fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0);
}

#[test]
fn test_export_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.json");
    fs::write(&path, "stale").unwrap();

    export_file(&[], ExportFormat::Json, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim(), "[]");
}
