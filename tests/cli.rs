use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn explore_prints_total_and_subtypes() {
    let mut cmd = Command::cargo_bin("ifc-tabulator").unwrap();
    cmd.arg("explore")
        .arg("tests/fixtures/three_walls_two_doors.ifc")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Total of 5 objects were found in this ifc file",
        ))
        .stdout(predicate::str::contains("IfcWall\n"))
        .stdout(predicate::str::contains("IfcDoor\n"));
}

#[test]
fn export_writes_the_workbook() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("export").join("IFC_data.xlsx");

    let mut cmd = Command::cargo_bin("ifc-tabulator").unwrap();
    cmd.arg("export")
        .arg("tests/fixtures/walls_and_door.ifc")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Excel file exported successfully in"));

    assert!(output.is_file());
}

#[test]
fn export_defaults_to_the_export_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let fixture = std::fs::canonicalize("tests/fixtures/walls_and_door.ifc").unwrap();

    let mut cmd = Command::cargo_bin("ifc-tabulator").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("export")
        .arg(&fixture)
        .assert()
        .success();

    assert!(temp_dir.path().join("export").join("IFC_data.xlsx").is_file());
}

#[test]
fn unreadable_input_exits_non_zero() {
    let mut cmd = Command::cargo_bin("ifc-tabulator").unwrap();
    cmd.arg("explore")
        .arg("tests/fixtures/missing.ifc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read file"));
}
