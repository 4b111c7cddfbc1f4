//! # IFC Tabulator
//!
//! Tabulates the building elements of an IFC model into spreadsheets.
//!
//! ## Features
//!
//! - Parse IFC files (IFC2x3 and IFC4 schemas)
//! - One sheet per building-element subtype (`IfcWall`, `IfcDoor`, ...)
//! - Property sets and quantity sets flattened into `Set.Property` columns
//! - Containing storey as a `Level` column
//! - Export to XLSX, CSV and JSON
//! - Listing of the object subtypes present in a model
//!
//! ## Example
//!
//! ```no_run
//! use ifc_tabulator::parser::open_ifc_file;
//! use ifc_tabulator::tabulate::build_sheet;
//!
//! let model = open_ifc_file("model.ifc")?;
//! let walls = build_sheet("IfcWall", model.instances_of("IfcWall"))?;
//! println!("{} walls, {} columns", walls.row_count(), walls.column_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod explore;
pub mod export;
pub mod model;
pub mod parser;
pub mod tabulate;
