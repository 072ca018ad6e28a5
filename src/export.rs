//! Export writers
//!
//! Serializes the collected rows to one of three interchangeable formats:
//! XLSX (one sheet, header row plus data rows), CSV (same shape), or
//! pretty-printed JSON (array of ten-field objects). Column order is fixed
//! by [`EXPORT_HEADERS`]; an existing file at the target path is
//! overwritten.

use crate::models::{Aggregation, ExportRow, EXPORT_HEADERS, NOT_AVAILABLE};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(anyhow::anyhow!(
                "Invalid export format: {other}. Please choose XLSX, CSV, or JSON."
            )),
        }
    }
}

/// Derive the output filename for one run.
///
/// `<YYYY-MM-DD_HH-MM-SS>_<location>_workspace_metrics_<aggregation>.<ext>`
pub fn export_filename(
    now: NaiveDateTime,
    location_name: &str,
    aggregation: Aggregation,
    format: ExportFormat,
) -> String {
    format!(
        "{}_{}_workspace_metrics_{}.{}",
        now.format("%Y-%m-%d_%H-%M-%S"),
        location_name,
        aggregation,
        format.extension()
    )
}

/// Write all rows to `path` in the chosen format.
pub fn export_file(rows: &[ExportRow], format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Xlsx => write_xlsx(rows, path),
        ExportFormat::Csv => write_csv(rows, path),
        ExportFormat::Json => write_json(rows, path),
    }?;

    info!(path = %path.display(), rows = rows.len(), format = format.extension(), "export complete");
    Ok(())
}

fn write_xlsx(rows: &[ExportRow], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Workspace Metrics")?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let r = (index + 1) as u32;
        sheet.write_string(r, 0, &row.workspace_name)?;
        sheet.write_number(r, 1, row.floor_number as f64)?;
        write_opt_number(sheet, r, 2, row.capacity.map(|c| c as f64))?;
        sheet.write_string(r, 3, &row.metric_name)?;
        sheet.write_string(r, 4, &row.start)?;
        sheet.write_string(r, 5, &row.end)?;
        write_opt_number(sheet, r, 6, row.duration)?;
        write_opt_number(sheet, r, 7, row.mean)?;
        write_opt_number(sheet, r, 8, row.min)?;
        write_opt_number(sheet, r, 9, row.max)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save XLSX file: {}", path.display()))?;
    Ok(())
}

fn write_opt_number(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) -> Result<(), XlsxError> {
    match value {
        Some(v) => sheet.write_number(row, col, v)?,
        None => sheet.write_string(row, col, NOT_AVAILABLE)?,
    };
    Ok(())
}

fn write_csv(rows: &[ExportRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    if rows.is_empty() {
        // serde only emits headers alongside the first record
        writer.write_record(EXPORT_HEADERS)?;
    } else {
        for row in rows {
            writer.serialize(row)?;
        }
    }

    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

fn write_json(rows: &[ExportRow], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), rows)
        .context("Failed to serialize rows to JSON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_from_str() {
        assert_eq!("xlsx".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!("yaml".parse::<ExportFormat>().is_err());
        assert!("XLSX".parse::<ExportFormat>().is_err());
        assert!("".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_filename_derivation() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap();
        let name = export_filename(now, "HQ", Aggregation::Hourly, ExportFormat::Csv);
        assert_eq!(name, "2024-03-10_09-05-30_HQ_workspace_metrics_hourly.csv");
    }
}
