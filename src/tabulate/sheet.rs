use serde::Serialize;
use std::collections::HashSet;

use super::extract_element_row;
use crate::error::DataAccessError;
use crate::model::{CellValue, Element, Row};

static EMPTY: CellValue = CellValue::Empty;

/// Rows of one element subtype, projected to the columns that carry data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Collects columns in first-seen order across `rows`, then drops every
    /// column that is absent or null in all of them. Empty strings count as
    /// values, so an uncontained element still keeps its `Level` column.
    #[must_use]
    pub fn from_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        let mut seen = HashSet::new();
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if seen.insert(key) {
                    columns.push(key.to_string());
                }
            }
        }

        columns.retain(|column| {
            rows.iter()
                .any(|row| row.get(column).is_some_and(|value| !value.is_null()))
        });

        let kept: HashSet<&str> = columns.iter().map(String::as_str).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter(|(key, _)| kept.contains(key))
                    .map(|(key, value)| (key, value.clone()))
                    .collect()
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Value at `row` × `column`; absent cells read as [`CellValue::Empty`].
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Tabulates `elements` in input order into one sheet.
pub fn build_sheet<'a, I>(name: &str, elements: I) -> Result<Sheet, DataAccessError>
where
    I: IntoIterator<Item = Element<'a>>,
{
    let rows = elements
        .into_iter()
        .map(|element| extract_element_row(&element))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Sheet::from_rows(name, rows))
}
