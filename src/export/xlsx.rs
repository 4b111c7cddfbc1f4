use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

use super::ensure_parent_dir;
use crate::error::ExportError;
use crate::model::CellValue;
use crate::tabulate::{Sheet, Workbook};

const MAX_SHEET_NAME: usize = 31;
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Writes every sheet of `workbook` as a worksheet of one `.xlsx` file.
///
/// The workbook is built in memory and saved in a single call, so a failure
/// part-way leaves no half-written file behind.
pub fn export_xlsx<P: AsRef<Path>>(workbook: &Workbook, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;

    let header = Format::new().set_bold();
    let mut xlsx = XlsxWorkbook::new();
    let mut used_names = HashSet::new();

    for sheet in workbook.sheets() {
        let name = worksheet_name(&sheet.name, &mut used_names);
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(&name)?;
        write_sheet(worksheet, sheet, &header)?;
    }

    // An xlsx file needs at least one worksheet
    if workbook.is_empty() {
        xlsx.add_worksheet();
    }

    xlsx.save(path_ref)?;
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, header: &Format) -> Result<(), ExportError> {
    for (col, column) in sheet.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, column, header)?;
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let xlsx_row = row_index(row_idx + 1)?;
        for (col, column) in sheet.columns.iter().enumerate() {
            let xlsx_col = column_index(col)?;
            match row.get(column) {
                None | Some(CellValue::Empty) => {}
                Some(CellValue::Bool(b)) => {
                    worksheet.write_boolean(xlsx_row, xlsx_col, *b)?;
                }
                Some(CellValue::Integer(i)) => {
                    worksheet.write_number(xlsx_row, xlsx_col, *i as f64)?;
                }
                Some(CellValue::Number(n)) => {
                    worksheet.write_number(xlsx_row, xlsx_col, *n)?;
                }
                Some(CellValue::Text(s)) => {
                    worksheet.write_string(xlsx_row, xlsx_col, s)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(())
}

fn row_index(row: usize) -> Result<u32, ExportError> {
    u32::try_from(row).map_err(|_| ExportError::WriteError {
        message: format!("row {row} exceeds the worksheet limit"),
    })
}

fn column_index(col: usize) -> Result<u16, ExportError> {
    u16::try_from(col).map_err(|_| ExportError::WriteError {
        message: format!("column {col} exceeds the worksheet limit"),
    })
}

/// Worksheet names are at most 31 characters, cannot contain `[]:*?/\`
/// and must be unique within the workbook (case-insensitively).
fn worksheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned
    };

    let mut candidate = cleaned.clone();
    let mut suffix = 1;
    while used.contains(&candidate.to_lowercase()) {
        suffix += 1;
        let tag = format!("~{suffix}");
        let keep = MAX_SHEET_NAME - tag.chars().count();
        candidate = format!("{}{tag}", cleaned.chars().take(keep).collect::<String>());
    }

    if candidate != name {
        warn!(original = name, renamed = %candidate, "worksheet name adjusted");
    }
    used.insert(candidate.to_lowercase());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;
    use pretty_assertions::assert_eq;

    #[test]
    fn sheet_names_are_sanitised_and_unique() {
        let mut used = HashSet::new();

        assert_eq!(worksheet_name("IfcWall", &mut used), "IfcWall");
        assert_eq!(worksheet_name("a/b?c", &mut used), "a_b_c");
        assert_eq!(
            worksheet_name("IfcBuildingElementProxyWithAVeryLongName", &mut used),
            "IfcBuildingElementProxyWithAVer"
        );
        assert_eq!(
            worksheet_name("IfcBuildingElementProxyWithAVeryLongOtherName", &mut used),
            "IfcBuildingElementProxyWithAV~2"
        );
        assert_eq!(worksheet_name("IFCWALL", &mut used), "IFCWALL~2");
    }

    #[test]
    fn writes_a_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.xlsx");

        let mut workbook = Workbook::new();
        let row: Row = [
            ("Name", CellValue::from("Wall")),
            ("Pset_WallCommon.IsExternal", CellValue::Bool(true)),
        ]
        .into_iter()
        .collect();
        workbook.push(Sheet::from_rows("IfcWall", vec![row]));

        export_xlsx(&workbook, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
