use std::collections::HashSet;

use super::{CellValue, IfcModel, PropertyGroup, Row};
use crate::error::DataAccessError;
use crate::parser::schema;
use crate::parser::step::{StepEntity, StepValue};

// IfcTypeObject.HasPropertySets
const TYPE_PROPERTY_SETS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetKind {
    Properties,
    Quantities,
}

/// One entity instance of an [`IfcModel`], with accessors for the data
/// that ends up in its tabulated row.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    model: &'a IfcModel,
    entity: &'a StepEntity,
}

impl<'a> Element<'a> {
    pub(crate) fn new(model: &'a IfcModel, entity: &'a StepEntity) -> Self {
        Self { model, entity }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.entity.id
    }

    /// Upper-case STEP spelling, e.g. `IFCWALL`.
    #[must_use]
    pub fn entity_type(&self) -> &'a str {
        &self.entity.entity_type
    }

    /// Canonical IFC spelling, e.g. `IfcWall`.
    #[must_use]
    pub fn type_name(&self) -> String {
        schema::canonical_name(&self.entity.entity_type)
    }

    pub fn global_id(&self) -> Result<&'a str, DataAccessError> {
        match self.entity.values.first() {
            Some(StepValue::String(id)) => Ok(id.as_str()),
            Some(StepValue::Null) | None => Err(self.missing("GlobalId")),
            Some(_) => Err(DataAccessError::UnexpectedValue {
                id: self.id(),
                entity_type: self.type_name(),
                attribute: "GlobalId",
            }),
        }
    }

    /// Native attributes: `id`, `type`, then every explicit attribute by name.
    pub fn attributes(&self) -> Result<Row, DataAccessError> {
        self.global_id()?;

        let names = schema::attribute_names(&self.entity.entity_type, self.model.version);
        let mut row = Row::new();
        row.insert(
            "id",
            CellValue::Integer(i64::try_from(self.id()).unwrap_or(i64::MAX)),
        );
        row.insert("type", CellValue::Text(self.type_name()));

        for (index, value) in self.entity.values.iter().enumerate() {
            let name = names
                .get(index)
                .map_or_else(|| format!("Attribute{index}"), ToString::to_string);
            row.insert(name, CellValue::from_step(value));
        }

        Ok(row)
    }

    /// The spatial structure element this element is contained in, if any.
    /// Parts without their own containment inherit the container of the
    /// assembly they aggregate into.
    pub fn container(&self) -> Result<Option<&'a StepEntity>, DataAccessError> {
        let mut current = self.id();
        let mut visited = HashSet::from([current]);

        loop {
            if let Some(container_id) = self.model.container_of(current) {
                return self.resolve(container_id, current).map(Some);
            }
            match self.model.aggregate_of(current) {
                Some(whole_id) if visited.insert(whole_id) => current = whole_id,
                _ => return Ok(None),
            }
        }
    }

    /// Name of the containing level, or an empty string when uncontained.
    pub fn level(&self) -> Result<String, DataAccessError> {
        let Some(container) = self.container()? else {
            return Ok(String::new());
        };
        match container.values.get(2) {
            Some(StepValue::String(name)) => Ok(name.clone()),
            Some(StepValue::Null) | None => Ok(String::new()),
            Some(_) => Err(DataAccessError::UnexpectedValue {
                id: container.id,
                entity_type: schema::canonical_name(&container.entity_type),
                attribute: "Name",
            }),
        }
    }

    /// `IfcPropertySet`s of the element's type object, overridden by its own.
    pub fn property_sets(&self) -> Result<PropertyGroup, DataAccessError> {
        self.collect_sets(SetKind::Properties)
    }

    /// `IfcElementQuantity` sets of the element's type object, overridden by its own.
    pub fn quantity_sets(&self) -> Result<PropertyGroup, DataAccessError> {
        self.collect_sets(SetKind::Quantities)
    }

    fn collect_sets(&self, kind: SetKind) -> Result<PropertyGroup, DataAccessError> {
        let mut group = PropertyGroup::new();

        for definition_id in self.definition_ids()? {
            let definition = self.resolve(definition_id, self.id())?;
            match (kind, definition.entity_type.as_str()) {
                (SetKind::Properties, "IFCPROPERTYSET") => {
                    let name = required_name(definition, 2)?;
                    let row = group.set_mut(name);
                    for property_id in references_at(definition, 4) {
                        let property = self.resolve(property_id, definition.id)?;
                        self.read_property(property, None, row)?;
                    }
                }
                (SetKind::Quantities, "IFCELEMENTQUANTITY") => {
                    let name = required_name(definition, 2)?;
                    let row = group.set_mut(name);
                    for quantity_id in references_at(definition, 5) {
                        let quantity = self.resolve(quantity_id, definition.id)?;
                        self.read_quantity(quantity, None, row)?;
                    }
                }
                _ => {}
            }
        }

        Ok(group)
    }

    /// Type-level definitions first so occurrence values win on merge.
    fn definition_ids(&self) -> Result<Vec<u64>, DataAccessError> {
        let mut ids = Vec::new();
        if let Some(type_id) = self.model.type_of(self.id()) {
            let type_object = self.resolve(type_id, self.id())?;
            ids.extend(references_at(type_object, TYPE_PROPERTY_SETS));
        }
        ids.extend_from_slice(self.model.definitions_of(self.id()));
        Ok(ids)
    }

    fn read_property(
        &self,
        property: &StepEntity,
        prefix: Option<&str>,
        row: &mut Row,
    ) -> Result<(), DataAccessError> {
        let key = prefixed(prefix, required_name(property, 0)?);

        match property.entity_type.as_str() {
            "IFCPROPERTYSINGLEVALUE" | "IFCPROPERTYENUMERATEDVALUE" | "IFCPROPERTYLISTVALUE" => {
                row.insert(key, value_at(property, 2));
            }
            "IFCPROPERTYBOUNDEDVALUE" => {
                row.insert(format!("{key}.UpperBoundValue"), value_at(property, 2));
                row.insert(format!("{key}.LowerBoundValue"), value_at(property, 3));
            }
            "IFCPROPERTYREFERENCEVALUE" => {
                row.insert(key, value_at(property, 3));
            }
            "IFCCOMPLEXPROPERTY" => {
                for sub_id in references_at(property, 3) {
                    let sub = self.resolve(sub_id, property.id)?;
                    self.read_property(sub, Some(key.as_str()), row)?;
                }
            }
            // Table values have no single-cell rendering
            _ => {}
        }

        Ok(())
    }

    fn read_quantity(
        &self,
        quantity: &StepEntity,
        prefix: Option<&str>,
        row: &mut Row,
    ) -> Result<(), DataAccessError> {
        let key = prefixed(prefix, required_name(quantity, 0)?);

        if quantity.entity_type == "IFCPHYSICALCOMPLEXQUANTITY" {
            for sub_id in references_at(quantity, 2) {
                let sub = self.resolve(sub_id, quantity.id)?;
                self.read_quantity(sub, Some(key.as_str()), row)?;
            }
        } else if quantity.entity_type.starts_with("IFCQUANTITY") {
            row.insert(key, value_at(quantity, 3));
        }

        Ok(())
    }

    fn resolve(&self, id: u64, referenced_by: u64) -> Result<&'a StepEntity, DataAccessError> {
        self.model
            .entity(id)
            .ok_or(DataAccessError::MissingEntity { id, referenced_by })
    }

    fn missing(&self, attribute: &'static str) -> DataAccessError {
        DataAccessError::MissingAttribute {
            id: self.id(),
            entity_type: self.type_name(),
            attribute,
        }
    }
}

fn required_name(entity: &StepEntity, index: usize) -> Result<&str, DataAccessError> {
    match entity.values.get(index) {
        Some(StepValue::String(name)) => Ok(name.as_str()),
        _ => Err(DataAccessError::MissingAttribute {
            id: entity.id,
            entity_type: schema::canonical_name(&entity.entity_type),
            attribute: "Name",
        }),
    }
}

fn references_at(entity: &StepEntity, index: usize) -> Vec<u64> {
    entity
        .values
        .get(index)
        .map(StepValue::references)
        .unwrap_or_default()
}

fn value_at(entity: &StepEntity, index: usize) -> CellValue {
    entity
        .values
        .get(index)
        .map(CellValue::from_step)
        .unwrap_or_default()
}

fn prefixed(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    }
}
