//! Export of flattened variant records as CSV or as an `.xlsx` workbook.

use std::ffi::OsStr;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use serde_json::Value;
use sizerun_core::{VariantRecord, EXPORT_COLUMNS};

/// Columns written as numeric cells in workbooks.
const PRICE_COLUMNS: [&str; 2] = ["Ціна", "Стара ціна"];

/// Writes `records` to `path`, replacing any existing file.
///
/// A path ending in `.xlsx` gets a workbook; anything else gets CSV.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row cannot be written.
pub(crate) fn write_output(path: &Path, records: &[VariantRecord]) -> anyhow::Result<()> {
    let is_workbook = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

    if is_workbook {
        let mut workbook = build_workbook(records)?;
        workbook
            .save(path)
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))
    } else {
        let file = File::create(path)
            .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", path.display()))?;
        write_records(file, records)
    }
}

/// Builds a single-sheet workbook: header row, then one row per record.
///
/// Prices become numeric cells with two decimals, absent values stay empty.
pub(crate) fn build_workbook(records: &[VariantRecord]) -> anyhow::Result<Workbook> {
    let mut workbook = Workbook::new();
    let price_format = Format::new().set_num_format("0.00");
    let sheet = workbook.add_worksheet();

    for (col, label) in EXPORT_COLUMNS.iter().enumerate() {
        sheet.write_string(0, u16::try_from(col)?, *label)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = u32::try_from(index + 1)?;
        let cells = serde_json::to_value(record)?;
        for (col, label) in EXPORT_COLUMNS.iter().enumerate() {
            let col = u16::try_from(col)?;
            match &cells[*label] {
                Value::Null => {}
                Value::String(text) if PRICE_COLUMNS.contains(label) => {
                    let amount: f64 = text.parse()?;
                    sheet.write_number_with_format(row, col, amount, &price_format)?;
                }
                Value::String(text) => {
                    sheet.write_string(row, col, text.as_str())?;
                }
                other => {
                    sheet.write_string(row, col, &other.to_string())?;
                }
            }
        }
    }

    Ok(workbook)
}

/// Writes the CSV header row and one row per record.
///
/// The header is always written, so an empty run still produces a valid
/// table.
pub(crate) fn write_records<W: Write>(writer: W, records: &[VariantRecord]) -> anyhow::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
