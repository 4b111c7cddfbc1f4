//! The export flow: open a model, tabulate every building-element subtype
//! into its own sheet and persist the workbook.

pub mod csv;
pub mod json;
pub mod xlsx;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub use crate::error::ExportError;
use crate::error::DataAccessError;
use crate::model::{Element, IfcModel};
use crate::parser::open_ifc_file;
use crate::tabulate::{build_sheet, SheetOrder, Workbook};
pub use csv::export_csv;
pub use json::export_json;
pub use xlsx::export_xlsx;

/// Where the workbook lands when no output path is given.
pub const DEFAULT_OUTPUT: &str = "export/IFC_data.xlsx";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// One workbook, one worksheet per subtype.
    #[default]
    Xlsx,
    /// One `<subtype>.csv` per subtype inside the output directory.
    Csv,
    /// One JSON document holding every sheet.
    Json,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output: PathBuf,
    pub format: ExportFormat,
    pub sheet_order: SheetOrder,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ExportFormat::default(),
            sheet_order: SheetOrder::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub sheets: usize,
    pub rows: usize,
    pub elapsed: Duration,
}

/// Distinct canonical names of the building-element subtypes in `model`.
#[must_use]
pub fn building_element_types(model: &IfcModel, order: SheetOrder) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut types: Vec<String> = model
        .building_elements()
        .iter()
        .filter(|element| seen.insert(element.entity_type()))
        .map(Element::type_name)
        .collect();

    if order == SheetOrder::Sorted {
        types.sort();
    }
    types
}

/// Builds one sheet per building-element subtype. The first element that
/// cannot be read aborts the whole workbook.
pub fn tabulate_building_elements(
    model: &IfcModel,
    order: SheetOrder,
) -> Result<Workbook, DataAccessError> {
    let mut workbook = Workbook::new();

    for type_name in building_element_types(model, order) {
        let sheet = build_sheet(&type_name, model.instances_of(&type_name))?;
        debug!(
            sheet = %type_name,
            rows = sheet.row_count(),
            columns = sheet.column_count(),
            "tabulated element type"
        );
        workbook.push(sheet);
    }

    Ok(workbook)
}

/// Persists `workbook` to `output` in `format`.
pub fn write_workbook(
    workbook: &Workbook,
    output: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Xlsx => export_xlsx(workbook, output),
        ExportFormat::Csv => export_csv(workbook, output),
        ExportFormat::Json => export_json(workbook, output),
    }
}

/// Runs the export flow end to end for the model at `path`.
///
/// # Example
///
/// ```no_run
/// use ifc_tabulator::export::{export_ifc_file, ExportOptions};
///
/// let summary = export_ifc_file("model.ifc", &ExportOptions::default())?;
/// println!("{} sheets in {:.2}s", summary.sheets, summary.elapsed.as_secs_f64());
/// # Ok::<(), ifc_tabulator::error::ExportError>(())
/// ```
pub fn export_ifc_file<P: AsRef<Path>>(
    path: P,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let start = Instant::now();

    let model = open_ifc_file(path)?;
    let workbook = tabulate_building_elements(&model, options.sheet_order)?;
    write_workbook(&workbook, &options.output, options.format)?;

    let summary = ExportSummary {
        output: options.output.clone(),
        sheets: workbook.len(),
        rows: workbook.row_count(),
        elapsed: start.elapsed(),
    };

    info!(
        output = %summary.output.display(),
        sheets = summary.sheets,
        rows = summary.rows,
        elapsed_ms = summary.elapsed.as_millis(),
        "export finished"
    );

    Ok(summary)
}

/// Creates the parent directory of `path` when it does not exist yet.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::DirectoryCreate {
        path: dir.to_path_buf(),
        source,
    })
}
