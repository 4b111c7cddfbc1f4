use crate::error::ExportError;
use crate::tabulate::Workbook;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::ensure_parent_dir;

pub fn export_json<P: AsRef<Path>>(workbook: &Workbook, path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let json = serde_json::to_string_pretty(workbook)?;

    ensure_parent_dir(path_ref)?;
    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Row};
    use crate::tabulate::Sheet;

    #[test]
    fn writes_sheets_with_null_for_missing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("ifc.json");

        let mut workbook = Workbook::new();
        let rows: Vec<Row> = vec![
            [("Name", CellValue::from("A")), ("Tag", CellValue::Empty)]
                .into_iter()
                .collect(),
            [("Name", CellValue::Empty), ("Tag", "T-2".into())]
                .into_iter()
                .collect(),
        ];
        workbook.push(Sheet::from_rows("IfcWall", rows));

        export_json(&workbook, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let sheet = &value["sheets"][0];
        assert_eq!(sheet["name"], "IfcWall");
        assert_eq!(sheet["columns"], serde_json::json!(["Name", "Tag"]));
        assert_eq!(sheet["rows"][0]["Tag"], serde_json::Value::Null);
        assert_eq!(sheet["rows"][1]["Tag"], "T-2");
    }
}
