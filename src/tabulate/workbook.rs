use serde::Serialize;

use super::Sheet;

/// Order in which subtype sheets are laid out in the workbook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SheetOrder {
    /// Lexicographic by subtype name.
    #[default]
    Sorted,
    /// Order in which each subtype first appears in the file.
    FirstSeen,
}

/// Sheets keyed by subtype name, in output order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet, replacing any earlier sheet of the same name.
    pub fn push(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Rows across all sheets.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(Sheet::row_count).sum()
    }
}
