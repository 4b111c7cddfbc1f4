use ifc_tabulator::export::{
    export_ifc_file, tabulate_building_elements, ExportFormat, ExportOptions,
};
use ifc_tabulator::model::CellValue;
use ifc_tabulator::parser::open_ifc_file;
use ifc_tabulator::tabulate::SheetOrder;
use pretty_assertions::assert_eq;

const FIXTURE: &str = "tests/fixtures/walls_and_door.ifc";

#[test]
fn walls_and_door_tabulate_into_two_sheets() {
    let model = open_ifc_file(FIXTURE).unwrap();
    let workbook = tabulate_building_elements(&model, SheetOrder::Sorted).unwrap();

    assert_eq!(workbook.len(), 2);

    let walls = workbook.sheet("IfcWall").unwrap();
    assert_eq!(walls.row_count(), 2);
    assert_eq!(walls.cell(0, "Pset_WallCommon.IsExternal"), &CellValue::Bool(true));
    assert_eq!(walls.cell(1, "Pset_WallCommon.IsExternal"), &CellValue::Empty);
    assert_eq!(walls.cell(0, "Level"), &CellValue::from("L1"));
    assert_eq!(walls.cell(1, "Level"), &CellValue::from("L2"));

    let doors = workbook.sheet("IfcDoor").unwrap();
    assert_eq!(doors.row_count(), 1);
    assert_eq!(doors.cell(0, "Level"), &CellValue::from("L1"));
    assert_eq!(doors.cell(0, "OverallWidth"), &CellValue::Number(900.0));
    assert!(!doors.columns.iter().any(|c| c.starts_with("Pset_")));
}

#[test]
fn every_sheet_column_has_a_value() {
    let model = open_ifc_file(FIXTURE).unwrap();
    let workbook = tabulate_building_elements(&model, SheetOrder::Sorted).unwrap();

    for sheet in workbook.sheets() {
        for column in &sheet.columns {
            assert!(
                (0..sheet.row_count()).any(|row| !sheet.cell(row, column).is_null()),
                "{} has an empty column {column}",
                sheet.name
            );
        }
    }
}

#[test]
fn xlsx_export_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("export").join("IFC_data.xlsx");
    let options = ExportOptions {
        output: output.clone(),
        ..ExportOptions::default()
    };

    let summary = export_ifc_file(FIXTURE, &options).unwrap();

    assert_eq!(summary.sheets, 2);
    assert_eq!(summary.rows, 3);
    assert!(output.is_file());
}

#[test]
fn csv_export_writes_a_file_per_subtype() {
    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions {
        output: dir.path().join("csv"),
        format: ExportFormat::Csv,
        sheet_order: SheetOrder::Sorted,
    };

    export_ifc_file(FIXTURE, &options).unwrap();

    let mut reader = csv::Reader::from_path(dir.path().join("csv").join("IfcWall.csv")).unwrap();
    let headers = reader.headers().unwrap().clone();
    let level = headers.iter().position(|h| h == "Level").unwrap();
    let external = headers
        .iter()
        .position(|h| h == "Pset_WallCommon.IsExternal")
        .unwrap();

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][level], "L1");
    assert_eq!(&records[0][external], "true");
    assert_eq!(&records[1][level], "L2");
    assert_eq!(&records[1][external], "");
    assert!(dir.path().join("csv").join("IfcDoor.csv").is_file());
}

#[test]
fn missing_input_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("IFC_data.xlsx");
    let options = ExportOptions {
        output: output.clone(),
        ..ExportOptions::default()
    };

    let err = export_ifc_file("tests/fixtures/missing.ifc", &options).unwrap_err();

    assert!(err.to_string().contains("failed to read file"));
    assert!(!output.exists());
}
