use crate::error::ExportError;
use crate::tabulate::Workbook;
use std::fs::File;
use std::path::Path;

use super::ensure_dir;

/// Writes each sheet to `<dir>/<sheet name>.csv`, header row first.
pub fn export_csv<P: AsRef<Path>>(workbook: &Workbook, dir: P) -> Result<(), ExportError> {
    let dir = dir.as_ref();
    ensure_dir(dir)?;

    for sheet in workbook.sheets() {
        let file_name = format!("{}.csv", sheet.name.replace(['/', '\\'], "_"));
        let path = dir.join(file_name);
        let file = File::create(&path).map_err(|source| ExportError::FileCreate {
            path: path.clone(),
            source,
        })?;

        let mut writer = csv::Writer::from_writer(file);

        writer.write_record(&sheet.columns)?;

        for row in &sheet.rows {
            writer.write_record(sheet.columns.iter().map(|column| {
                row.get(column).map(ToString::to_string).unwrap_or_default()
            }))?;
        }

        writer.flush().map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;
    }

    Ok(())
}
