use serde::Serialize;
use std::fmt;

use crate::parser::StepValue;

/// A scalar that lands in one spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// True only for `$`/`*` values; an empty string is still a value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    #[must_use]
    pub fn from_step(value: &StepValue) -> Self {
        match value {
            StepValue::String(s) => CellValue::Text(s.clone()),
            StepValue::Real(f) => CellValue::Number(*f),
            StepValue::Integer(i) => CellValue::Integer(*i),
            StepValue::Boolean(b) => CellValue::Bool(*b),
            // .U. is the third state of IfcLogical
            StepValue::Enum(e) if e == "U" => CellValue::Text("UNKNOWN".to_string()),
            StepValue::Enum(e) => CellValue::Text(e.clone()),
            StepValue::Reference(id) => CellValue::Text(format!("#{id}")),
            StepValue::List(items) => CellValue::Text(
                items
                    .iter()
                    .map(|item| CellValue::from_step(item).to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            StepValue::Null | StepValue::Derived => CellValue::Empty,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn converts_step_values() {
        assert_eq!(CellValue::from_step(&StepValue::Boolean(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from_step(&StepValue::Null), CellValue::Empty);
        assert_eq!(CellValue::from_step(&StepValue::Reference(7)), "#7".into());
        assert_eq!(CellValue::from_step(&StepValue::Enum("U".into())), "UNKNOWN".into());
        assert_eq!(
            CellValue::from_step(&StepValue::List(vec![
                StepValue::String("A".into()),
                StepValue::Real(2.5),
            ])),
            "A, 2.5".into()
        );
    }

    #[test]
    fn only_empty_is_null() {
        assert!(CellValue::Empty.is_null());
        assert!(!CellValue::from("").is_null());
        assert!(!CellValue::Bool(false).is_null());
        assert!(!CellValue::Integer(0).is_null());
    }
}
