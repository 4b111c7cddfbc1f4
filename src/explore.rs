//! Diagnostic listing of the object subtypes present in a model.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::model::{Element, IfcModel};

/// Count of `IfcObject` instances and the distinct subtypes among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exploration {
    pub total: usize,
    /// Canonical names, in order of first appearance.
    pub subtypes: Vec<String>,
}

#[must_use]
pub fn explore(model: &IfcModel) -> Exploration {
    let objects = model.objects();

    let mut seen = HashSet::new();
    let subtypes = objects
        .iter()
        .filter(|object| seen.insert(object.entity_type()))
        .map(Element::type_name)
        .collect();

    Exploration {
        total: objects.len(),
        subtypes,
    }
}

impl fmt::Display for Exploration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total of {} objects were found in this ifc file", self.total)?;
        for subtype in &self.subtypes {
            writeln!(f, "{subtype}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_ifc;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_objects_and_lists_subtypes() {
        let model = parse_ifc(
            include_str!("../tests/fixtures/three_walls_two_doors.ifc"),
            String::new(),
        )
        .unwrap();

        let exploration = explore(&model);

        assert_eq!(exploration.total, 5);
        assert_eq!(exploration.subtypes, vec!["IfcWall", "IfcDoor"]);
        assert_eq!(
            exploration.to_string(),
            "Total of 5 objects were found in this ifc file\nIfcWall\nIfcDoor\n"
        );
    }

    #[test]
    fn spatial_structure_counts_as_objects() {
        let model = parse_ifc(
            include_str!("../tests/fixtures/walls_and_door.ifc"),
            String::new(),
        )
        .unwrap();

        let exploration = explore(&model);

        // IFC4: two storeys, two walls, one door; IfcProject is a context
        assert_eq!(exploration.total, 5);
        assert_eq!(
            exploration.subtypes,
            vec!["IfcBuildingStorey", "IfcWall", "IfcDoor"]
        );
    }
}
