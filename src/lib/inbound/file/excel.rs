use crate::inbound::file::Reader;
use anyhow::Context;
use calamine::{Data, ExcelDateTime, Reader as CalamineReader, open_workbook_auto};
use csv::WriterBuilder;
use std::path::Path;

// Largest float that still has an exact integer representation.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

// Dates render as ISO timestamps, durations as `[h]:mm:ss` the way the sheet
// shows them. Anything chrono cannot represent falls back to the raw serial.
fn render_date_time(dt: &ExcelDateTime) -> Option<String> {
    if dt.is_duration() {
        let total = dt.as_duration()?.num_seconds();
        let sign = if total < 0 { "-" } else { "" };
        let total = total.unsigned_abs();
        Some(format!(
            "{}{}:{:02}:{:02}",
            sign,
            total / 3600,
            total / 60 % 60,
            total % 60
        ))
    } else {
        dt.as_datetime()
            .map(|ndt| ndt.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}

fn render_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Text of a cell as it would appear in a CSV export of the sheet.
pub fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => render_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => {
            render_date_time(dt).unwrap_or_else(|| render_float(dt.as_f64()))
        }
        Data::DateTimeIso(dt) => dt.clone(),
        Data::DurationIso(d) => d.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Writes sheet rows as CSV text, dropping rows without any data.
pub fn rows_to_csv_text<'a, I>(rows: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for row in rows {
        if is_blank(row) {
            continue;
        }
        wtr.write_record(row.iter().map(render_cell))
            .context("failed to write worksheet row as csv")?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush worksheet csv: {}", e))?;
    String::from_utf8(bytes).context("worksheet csv is not valid utf-8")
}

pub trait Excel {
    fn excel_to_csv_text(path: &Path) -> anyhow::Result<String>;
}

impl Excel for Reader {
    fn excel_to_csv_text(path: &Path) -> anyhow::Result<String> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown file")
            .to_string();
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("failed to open excel file: {}", file_name))?;
        let sheet_names = workbook.sheet_names().to_owned();
        let first_sheet_name = sheet_names
            .first()
            .ok_or_else(|| anyhow::anyhow!("excel file '{}' has no worksheets", file_name))?
            .clone();
        let range = workbook
            .worksheet_range(&first_sheet_name)
            .with_context(|| {
                format!(
                    "failed to read worksheet '{}' from excel file: {}",
                    first_sheet_name, file_name
                )
            })?;
        rows_to_csv_text(range.rows()).with_context(|| {
            format!(
                "failed to convert worksheet '{}' of excel file '{}'",
                first_sheet_name, file_name
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTimeType;

    #[test]
    fn renders_cells_like_a_csv_export() {
        assert_eq!(render_cell(&Data::Empty), "");
        assert_eq!(render_cell(&Data::String("Rover".to_string())), "Rover");
        assert_eq!(render_cell(&Data::Float(7.0)), "7");
        assert_eq!(render_cell(&Data::Float(2.5)), "2.5");
        assert_eq!(render_cell(&Data::Int(-3)), "-3");
        assert_eq!(render_cell(&Data::Bool(true)), "true");
    }

    #[test]
    fn date_cells_render_iso() {
        let noon = ExcelDateTime::new(45292.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(render_cell(&Data::DateTime(noon)), "2024-01-01T12:00:00");
        let midnight = ExcelDateTime::new(45292.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(render_cell(&Data::DateTime(midnight)), "2024-01-01T00:00:00");
    }

    #[test]
    fn duration_cells_render_as_elapsed_time() {
        let day_and_a_half = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(render_cell(&Data::DateTime(day_and_a_half)), "36:00:00");
        let ninety_seconds = ExcelDateTime::new(90.0 / 86400.0, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(render_cell(&Data::DateTime(ninety_seconds)), "0:01:30");
    }

    #[test]
    fn rows_become_csv_without_blank_rows() {
        let rows = vec![
            vec![
                Data::String("Name".to_string()),
                Data::String("Email".to_string()),
                Data::String("Notes".to_string()),
            ],
            vec![Data::Empty, Data::String("  ".to_string()), Data::Empty],
            vec![
                Data::String("Ada, Countess".to_string()),
                Data::String("ada@example.com".to_string()),
                Data::Empty,
            ],
        ];
        let text = rows_to_csv_text(rows.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(text, "Name,Email,Notes\n\"Ada, Countess\",ada@example.com,\n");
    }

    #[test]
    fn missing_workbook_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = <Reader as Excel>::excel_to_csv_text(&dir.path().join("gone.xlsx")).unwrap_err();
        assert!(err.to_string().contains("gone.xlsx"));
    }
}
