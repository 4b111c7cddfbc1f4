//! Turning elements into flat rows and homogeneous rows into sheets.

pub mod flatten;
pub mod sheet;
pub mod workbook;

pub use flatten::{extract_element_row, flatten_property_group, LEVEL_COLUMN};
pub use sheet::{build_sheet, Sheet};
pub use workbook::{SheetOrder, Workbook};
