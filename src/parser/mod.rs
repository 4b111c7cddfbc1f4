pub mod ifc;
pub mod schema;
pub mod step;

pub use crate::error::ParseError;
pub use ifc::{open_ifc_file, parse_ifc};
pub use schema::SchemaVersion;
pub use step::{StepEntity, StepFile, StepValue};
