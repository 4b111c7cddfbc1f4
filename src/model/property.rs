use serde::Serialize;

use super::{CellValue, Row};

/// A named group of properties (or quantities) attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySet {
    pub name: String,
    pub properties: Row,
}

/// Property sets of one element keyed by set name, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyGroup {
    sets: Vec<PropertySet>,
}

impl PropertyGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The set named `name`, created empty on first use.
    pub fn set_mut(&mut self, name: &str) -> &mut Row {
        let pos = match self.sets.iter().position(|s| s.name == name) {
            Some(pos) => pos,
            None => {
                self.sets.push(PropertySet {
                    name: name.to_string(),
                    properties: Row::new(),
                });
                self.sets.len() - 1
            }
        };
        &mut self.sets[pos].properties
    }

    pub fn insert(&mut self, set: &str, property: impl Into<String>, value: CellValue) {
        self.set_mut(set).insert(property, value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Row> {
        self.sets
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.properties)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertySet> {
        self.sets.iter()
    }

    /// Number of sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Total number of properties across all sets.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.sets.iter().map(|s| s.properties.len()).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Row)> for PropertyGroup {
    fn from_iter<I: IntoIterator<Item = (S, Row)>>(iter: I) -> Self {
        let mut group = PropertyGroup::new();
        for (name, properties) in iter {
            let name = name.into();
            group.set_mut(&name).extend(properties);
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn later_values_override_within_a_set() {
        let mut group = PropertyGroup::new();
        group.insert("Pset_WallCommon", "IsExternal", false.into());
        group.insert("Pset_WallCommon", "LoadBearing", true.into());
        group.insert("Pset_WallCommon", "IsExternal", true.into());

        assert_eq!(group.len(), 1);
        assert_eq!(group.property_count(), 2);
        assert_eq!(
            group.get("Pset_WallCommon").and_then(|s| s.get("IsExternal")),
            Some(&CellValue::Bool(true))
        );
    }
}
