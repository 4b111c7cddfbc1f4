use crate::error::DataAccessError;
use crate::model::{CellValue, Element, PropertyGroup, Row};

pub const LEVEL_COLUMN: &str = "Level";

/// Flattens `{set: {property: value}}` into `{"set.property": value}`.
///
/// Keys follow set order, then property order. Names are not escaped, so a
/// property named `a.b` in set `s` and a property `b` in a set named `s.a`
/// share the key `s.a.b` and the later one wins.
#[must_use]
pub fn flatten_property_group(group: &PropertyGroup) -> Row {
    group
        .iter()
        .flat_map(|set| {
            set.properties
                .iter()
                .map(move |(property, value)| (format!("{}.{property}", set.name), value.clone()))
        })
        .collect()
}

/// Builds the flat row of one element.
///
/// Sources are merged in order: native attributes, `Level`, property sets,
/// quantity sets. A later source overwrites a same-named column of an
/// earlier one.
pub fn extract_element_row(element: &Element<'_>) -> Result<Row, DataAccessError> {
    let mut row = element.attributes()?;
    row.insert(LEVEL_COLUMN, CellValue::Text(element.level()?));
    row.extend(flatten_property_group(&element.property_sets()?));
    row.extend(flatten_property_group(&element.quantity_sets()?));
    Ok(row)
}
