pub mod element;
pub mod ifc_model;
pub mod property;
pub mod row;
pub mod value;

pub use element::Element;
pub use ifc_model::{IfcModel, Relationships};
pub use property::{PropertyGroup, PropertySet};
pub use row::Row;
pub use value::CellValue;
