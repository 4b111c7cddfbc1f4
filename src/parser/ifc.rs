use crate::error::ParseError;
use crate::model::{IfcModel, Relationships};
use crate::parser::step::{StepFile, StepValue};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Opens an IFC file and indexes the relationships needed for tabulation.
///
/// Supports both IFC2x3 and IFC4 schemas. Resolves:
/// - Spatial containment (element → storey)
/// - Aggregation (part → whole), for parts that are not contained directly
/// - Property set and quantity set assignments
/// - Type object assignments
///
/// # Arguments
///
/// * `path` - Path to the IFC file
///
/// # Errors
///
/// Returns [`ParseError::FileRead`] if the file cannot be read.
/// Returns [`ParseError::InvalidStep`] if the STEP format is malformed.
///
/// # Example
///
/// ```no_run
/// use ifc_tabulator::parser::open_ifc_file;
///
/// let model = open_ifc_file("model.ifc")?;
/// for wall in model.instances_of("IfcWall") {
///     println!("#{} {}", wall.id(), wall.level()?);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open_ifc_file<P: AsRef<Path>>(path: P) -> Result<IfcModel, ParseError> {
    let bytes = std::fs::read(&path).map_err(|source| ParseError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    let content = decode_content(bytes);
    parse_ifc(&content, path.as_ref().to_string_lossy().to_string())
}

/// UTF-8 when valid, otherwise every byte is read as a Latin-1 character.
fn decode_content(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(err) => {
            warn!("IFC file is not valid UTF-8, reading it as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Same as [`open_ifc_file`] for content already in memory.
pub fn parse_ifc(content: &str, file_path: String) -> Result<IfcModel, ParseError> {
    let step_file = StepFile::parse(content)?;

    let relationships = Relationships {
        containment: extract_spatial_containment(&step_file),
        aggregates: extract_aggregation(&step_file),
        definitions: extract_property_definitions(&step_file),
        type_of: extract_type_assignments(&step_file),
    };

    let contained = relationships.containment.len();
    let model = IfcModel::new(step_file, relationships, file_path);

    debug!(
        path = %model.file_path,
        schema = %model.schema,
        entities = model.entity_count(),
        contained,
        "opened IFC model"
    );

    Ok(model)
}

/// Pairs of (references at index 4, references at index 5), the layout
/// shared by the IfcRel* entities used here. Most put the related objects
/// first; IfcRelAggregates puts the relating object first.
fn relationship_pairs<'a>(
    step_file: &'a StepFile,
    rel_type: &str,
) -> impl Iterator<Item = (Vec<u64>, Vec<u64>)> + 'a {
    step_file
        .get_entities_by_type(rel_type)
        .into_iter()
        .map(|rel| {
            let related = rel
                .values
                .get(4)
                .map(StepValue::references)
                .unwrap_or_default();
            let relating = rel
                .values
                .get(5)
                .map(StepValue::references)
                .unwrap_or_default();
            (related, relating)
        })
}

/// Extract element → storey relationships from IFCRELCONTAINEDINSPATIALSTRUCTURE
fn extract_spatial_containment(step_file: &StepFile) -> HashMap<u64, u64> {
    let mut element_to_storey = HashMap::new();

    for (elements, structure) in
        relationship_pairs(step_file, "IFCRELCONTAINEDINSPATIALSTRUCTURE")
    {
        if let Some(&structure_id) = structure.first() {
            for elem_id in elements {
                element_to_storey.insert(elem_id, structure_id);
            }
        }
    }

    element_to_storey
}

/// Part → whole from IFCRELAGGREGATES (relating at index 4, related at 5)
fn extract_aggregation(step_file: &StepFile) -> HashMap<u64, u64> {
    let mut part_to_whole = HashMap::new();

    for (whole, parts) in relationship_pairs(step_file, "IFCRELAGGREGATES") {
        if let Some(&whole_id) = whole.first() {
            for part_id in parts {
                part_to_whole.insert(part_id, whole_id);
            }
        }
    }

    part_to_whole
}

/// Object → property definitions from IFCRELDEFINESBYPROPERTIES, in file order.
/// IFC4 allows the relating side to be a set of definitions.
fn extract_property_definitions(step_file: &StepFile) -> HashMap<u64, Vec<u64>> {
    let mut definitions: HashMap<u64, Vec<u64>> = HashMap::new();

    for (objects, property_definitions) in
        relationship_pairs(step_file, "IFCRELDEFINESBYPROPERTIES")
    {
        for object_id in objects {
            definitions
                .entry(object_id)
                .or_default()
                .extend(&property_definitions);
        }
    }

    definitions
}

/// Object → type object from IFCRELDEFINESBYTYPE
fn extract_type_assignments(step_file: &StepFile) -> HashMap<u64, u64> {
    let mut type_of = HashMap::new();

    for (objects, relating_type) in relationship_pairs(step_file, "IFCRELDEFINESBYTYPE") {
        if let Some(&type_id) = relating_type.first() {
            for object_id in objects {
                type_of.insert(object_id, type_id);
            }
        }
    }

    type_of
}
