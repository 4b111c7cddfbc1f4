//! Error types for IFC Tabulator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when opening an IFC file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the IFC file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The STEP format is invalid or malformed.
    #[error("invalid STEP format: {message}")]
    InvalidStep { message: String },
}

/// Errors raised when an element's attributes or property data cannot be read.
#[derive(Debug, Error, PartialEq)]
pub enum DataAccessError {
    /// A relationship or property set points at an entity that is not in the file.
    #[error("entity #{id} referenced by #{referenced_by} does not exist")]
    MissingEntity { id: u64, referenced_by: u64 },

    /// A required attribute slot is absent or null.
    #[error("entity #{id} ({entity_type}) has no {attribute}")]
    MissingAttribute {
        id: u64,
        entity_type: String,
        attribute: &'static str,
    },

    /// An attribute holds a value of the wrong kind.
    #[error("entity #{id} ({entity_type}): unexpected value for {attribute}")]
    UnexpectedValue {
        id: u64,
        entity_type: String,
        attribute: &'static str,
    },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The input model could not be opened.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An element could not be tabulated.
    #[error("failed to tabulate elements: {source}")]
    Data {
        #[from]
        source: DataAccessError,
    },

    /// Failed to create the output directory.
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to build or save the xlsx workbook.
    #[error("xlsx write failed: {source}")]
    Xlsx {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
