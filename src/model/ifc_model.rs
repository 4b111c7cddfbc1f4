use std::collections::HashMap;

use super::Element;
use crate::parser::schema::{self, SchemaVersion};
use crate::parser::step::{StepEntity, StepFile, StepValue};

/// Relationship indexes resolved once when the file is opened.
#[derive(Debug, Default)]
pub struct Relationships {
    pub containment: HashMap<u64, u64>, // element_id → spatial structure id
    pub aggregates: HashMap<u64, u64>, // part_id → whole id
    pub definitions: HashMap<u64, Vec<u64>>, // object_id → property definition ids
    pub type_of: HashMap<u64, u64>, // object_id → type object id
}

/// Read-only handle over a parsed IFC file.
#[derive(Debug)]
pub struct IfcModel {
    pub file_path: String,
    pub schema: String,
    pub version: SchemaVersion,
    step: StepFile,
    relationships: Relationships,
}

impl IfcModel {
    #[must_use]
    pub fn new(step: StepFile, relationships: Relationships, file_path: String) -> Self {
        let schema = step.schema.clone();
        Self {
            file_path,
            version: SchemaVersion::from_identifier(&schema),
            schema,
            step,
            relationships,
        }
    }

    #[must_use]
    pub fn entity(&self, id: u64) -> Option<&StepEntity> {
        self.step.get_entity(id)
    }

    #[must_use]
    pub fn element(&self, id: u64) -> Option<Element<'_>> {
        self.entity(id).map(|entity| Element::new(self, entity))
    }

    /// Instances of exactly `type_name` (subtypes excluded), in file order.
    /// Accepts both `IfcWall` and `IFCWALL` spellings.
    #[must_use]
    pub fn instances_of(&self, type_name: &str) -> Vec<Element<'_>> {
        self.step
            .get_entities_by_type(&type_name.to_ascii_uppercase())
            .into_iter()
            .map(|entity| Element::new(self, entity))
            .collect()
    }

    /// Every instance of the `IfcBuildingElement` subtree.
    #[must_use]
    pub fn building_elements(&self) -> Vec<Element<'_>> {
        self.step
            .entities()
            .filter(|e| schema::is_building_element(&e.entity_type, self.version))
            .map(|entity| Element::new(self, entity))
            .collect()
    }

    /// Every instance of the `IfcObject` subtree.
    #[must_use]
    pub fn objects(&self) -> Vec<Element<'_>> {
        self.step
            .entities()
            .filter(|e| {
                schema::is_object_type(&e.entity_type, self.version)
                    && e.values
                        .first()
                        .and_then(StepValue::as_str)
                        .is_some_and(schema::is_global_id)
            })
            .map(|entity| Element::new(self, entity))
            .collect()
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.step.len()
    }

    pub(crate) fn container_of(&self, id: u64) -> Option<u64> {
        self.relationships.containment.get(&id).copied()
    }

    pub(crate) fn aggregate_of(&self, id: u64) -> Option<u64> {
        self.relationships.aggregates.get(&id).copied()
    }

    pub(crate) fn definitions_of(&self, id: u64) -> &[u64] {
        self.relationships
            .definitions
            .get(&id)
            .map_or(&[], Vec::as_slice)
    }

    pub(crate) fn type_of(&self, id: u64) -> Option<u64> {
        self.relationships.type_of.get(&id).copied()
    }
}
