//! Static knowledge of the IFC schemas needed for tabulation: canonical entity
//! spelling, the `IfcBuildingElement` and `IfcObject` subtrees, and the names
//! of the explicit attributes of building elements.

/// Schema family declared in the `FILE_SCHEMA` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    Ifc2x3,
    Ifc4,
}

impl SchemaVersion {
    /// Unknown identifiers are read as IFC4, the current baseline.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        if identifier.to_ascii_uppercase().starts_with("IFC2X") {
            SchemaVersion::Ifc2x3
        } else {
            SchemaVersion::Ifc4
        }
    }
}

// Concrete IfcBuildingElement subtypes present in both IFC2X3 and IFC4
const BUILDING_ELEMENTS: &[&str] = &[
    "IfcBeam",
    "IfcBuildingElementProxy",
    "IfcColumn",
    "IfcCovering",
    "IfcCurtainWall",
    "IfcDoor",
    "IfcFooting",
    "IfcMember",
    "IfcPile",
    "IfcPlate",
    "IfcRailing",
    "IfcRamp",
    "IfcRampFlight",
    "IfcRoof",
    "IfcSlab",
    "IfcStair",
    "IfcStairFlight",
    "IfcWall",
    "IfcWallStandardCase",
    "IfcWindow",
];

// IFC2X3 only: IfcBuildingElementComponent branch
const BUILDING_ELEMENTS_IFC2X3: &[&str] = &[
    "IfcBuildingElementPart",
    "IfcReinforcingBar",
    "IfcReinforcingMesh",
    "IfcTendon",
    "IfcTendonAnchor",
];

const BUILDING_ELEMENTS_IFC4: &[&str] = &[
    "IfcBeamStandardCase",
    "IfcChimney",
    "IfcColumnStandardCase",
    "IfcDoorStandardCase",
    "IfcMemberStandardCase",
    "IfcPlateStandardCase",
    "IfcShadingDevice",
    "IfcSlabElementedCase",
    "IfcSlabStandardCase",
    "IfcWallElementedCase",
    "IfcWindowStandardCase",
];

// Other entity names worth spelling canonically in reports
const OTHER_ENTITIES: &[&str] = &[
    "IfcActor",
    "IfcAirTerminal",
    "IfcAnnotation",
    "IfcBuilding",
    "IfcBuildingStorey",
    "IfcBuildingSystem",
    "IfcCableCarrierFitting",
    "IfcCableCarrierSegment",
    "IfcCableSegment",
    "IfcCivilElement",
    "IfcDiscreteAccessory",
    "IfcDistributionChamberElement",
    "IfcDistributionCircuit",
    "IfcDistributionControlElement",
    "IfcDistributionElement",
    "IfcDistributionFlowElement",
    "IfcDistributionPort",
    "IfcDistributionSystem",
    "IfcDuctFitting",
    "IfcDuctSegment",
    "IfcElectricAppliance",
    "IfcElementAssembly",
    "IfcEnergyConversionDevice",
    "IfcExternalSpatialElement",
    "IfcFastener",
    "IfcFlowController",
    "IfcFlowFitting",
    "IfcFlowMovingDevice",
    "IfcFlowSegment",
    "IfcFlowStorageDevice",
    "IfcFlowTerminal",
    "IfcFlowTreatmentDevice",
    "IfcFurnishingElement",
    "IfcFurniture",
    "IfcGeographicElement",
    "IfcGrid",
    "IfcGroup",
    "IfcLightFixture",
    "IfcMechanicalFastener",
    "IfcOpeningElement",
    "IfcOpeningStandardCase",
    "IfcOutlet",
    "IfcPipeFitting",
    "IfcPipeSegment",
    "IfcProject",
    "IfcProxy",
    "IfcSanitaryTerminal",
    "IfcSite",
    "IfcSpace",
    "IfcSpatialZone",
    "IfcStructuralAnalysisModel",
    "IfcStructuralCurveMember",
    "IfcStructuralPointConnection",
    "IfcSwitchingDevice",
    "IfcSystem",
    "IfcTask",
    "IfcTransportElement",
    "IfcVirtualElement",
    "IfcZone",
];

// IfcPropertySetDefinition subtypes whose names carry no Properties/Quantity marker
const PROPERTY_SET_DEFINITIONS: &[&str] = &[
    "IFCSERVICELIFE",
    "IFCSERVICELIFEFACTOR",
    "IFCSOUNDVALUE",
];

// IfcRoot → IfcObjectDefinition → IfcObject → IfcProduct → IfcElement
const ELEMENT_ATTRIBUTES: &[&str] = &[
    "GlobalId",
    "OwnerHistory",
    "Name",
    "Description",
    "ObjectType",
    "ObjectPlacement",
    "Representation",
    "Tag",
];

const DOOR_IFC4: &[&str] = &[
    "OverallHeight",
    "OverallWidth",
    "PredefinedType",
    "OperationType",
    "UserDefinedOperationType",
];

const WINDOW_IFC4: &[&str] = &[
    "OverallHeight",
    "OverallWidth",
    "PredefinedType",
    "PartitioningType",
    "UserDefinedPartitioningType",
];

/// Attributes declared below `IfcElement`, per schema.
fn attribute_tail(canonical: &str, version: SchemaVersion) -> &'static [&'static str] {
    match (canonical, version) {
        ("IfcDoor" | "IfcWindow", SchemaVersion::Ifc2x3) => &["OverallHeight", "OverallWidth"],
        ("IfcDoor" | "IfcDoorStandardCase", SchemaVersion::Ifc4) => DOOR_IFC4,
        ("IfcWindow" | "IfcWindowStandardCase", SchemaVersion::Ifc4) => WINDOW_IFC4,
        ("IfcStairFlight", SchemaVersion::Ifc2x3) => {
            &["NumberOfRiser", "NumberOfTreads", "RiserHeight", "TreadLength"]
        }
        ("IfcStairFlight", SchemaVersion::Ifc4) => &[
            "NumberOfRisers",
            "NumberOfTreads",
            "RiserHeight",
            "TreadLength",
            "PredefinedType",
        ],
        ("IfcPile", _) => &["PredefinedType", "ConstructionType"],
        ("IfcRoof" | "IfcStair" | "IfcRamp", SchemaVersion::Ifc2x3) => &["ShapeType"],
        ("IfcBuildingElementProxy", SchemaVersion::Ifc2x3) => &["CompositionType"],
        (
            "IfcSlab" | "IfcRailing" | "IfcCovering" | "IfcFooting",
            SchemaVersion::Ifc2x3,
        ) => &["PredefinedType"],
        ("IfcReinforcingBar", SchemaVersion::Ifc2x3) => &[
            "SteelGrade",
            "NominalDiameter",
            "CrossSectionArea",
            "BarLength",
            "BarRole",
            "BarSurface",
        ],
        (_, SchemaVersion::Ifc2x3) => &[],
        (name, SchemaVersion::Ifc4) if is_building_element(name, SchemaVersion::Ifc4) => {
            &["PredefinedType"]
        }
        _ => &[],
    }
}

fn lookup(name: &str) -> Option<&'static str> {
    BUILDING_ELEMENTS
        .iter()
        .chain(BUILDING_ELEMENTS_IFC2X3)
        .chain(BUILDING_ELEMENTS_IFC4)
        .chain(OTHER_ENTITIES)
        .find(|known| known.eq_ignore_ascii_case(name))
        .copied()
}

/// Canonical spelling of an entity name, e.g. `IFCWALLSTANDARDCASE` → `IfcWallStandardCase`.
///
/// Names outside the known tables fall back to `Ifc` + capitalised remainder.
#[must_use]
pub fn canonical_name(entity_type: &str) -> String {
    if let Some(known) = lookup(entity_type) {
        return known.to_string();
    }

    let upper = entity_type.to_ascii_uppercase();
    match upper.strip_prefix("IFC") {
        Some(rest) if !rest.is_empty() => {
            let mut chars = rest.chars();
            let first = chars.next().map(|c| c.to_ascii_uppercase());
            let tail: String = chars.as_str().to_ascii_lowercase();
            format!("Ifc{}{tail}", first.unwrap_or_default())
        }
        _ => entity_type.to_string(),
    }
}

/// Whether `entity_type` is a concrete subtype of `IfcBuildingElement` in `version`.
#[must_use]
pub fn is_building_element(entity_type: &str, version: SchemaVersion) -> bool {
    let versioned = match version {
        SchemaVersion::Ifc2x3 => BUILDING_ELEMENTS_IFC2X3,
        SchemaVersion::Ifc4 => BUILDING_ELEMENTS_IFC4,
    };
    BUILDING_ELEMENTS
        .iter()
        .chain(versioned)
        .any(|known| known.eq_ignore_ascii_case(entity_type))
}

/// Whether an `IfcRoot` entity of this type belongs to the `IfcObject` branch.
///
/// The other rooted branches are relationships, property definitions, type
/// objects and (from IFC4 on) contexts.
#[must_use]
pub fn is_object_type(entity_type: &str, version: SchemaVersion) -> bool {
    let upper = entity_type.to_ascii_uppercase();

    if upper.starts_with("IFCREL")
        || upper.starts_with("IFCPROPERTY")
        || upper.starts_with("IFCQUANTITY")
        || upper == "IFCELEMENTQUANTITY"
        || PROPERTY_SET_DEFINITIONS.contains(&upper.as_str())
        || upper.ends_with("PROPERTIES")
        || upper.ends_with("TEMPLATE")
        || upper.ends_with("TYPE")
        || upper.ends_with("STYLE")
        || upper == "IFCTYPEOBJECT"
        || upper == "IFCTYPEPRODUCT"
        || upper == "IFCTYPEPROCESS"
        || upper == "IFCTYPERESOURCE"
    {
        return false;
    }

    match version {
        SchemaVersion::Ifc2x3 => true,
        SchemaVersion::Ifc4 => upper != "IFCPROJECT" && upper != "IFCPROJECTLIBRARY",
    }
}

/// Ordered names of the explicit attributes of `entity_type`.
///
/// Building elements get the full `IfcElement` chain plus their own tail;
/// any other rooted entity only the `IfcRoot` attributes. Callers name
/// positions past the end themselves.
#[must_use]
pub fn attribute_names(entity_type: &str, version: SchemaVersion) -> Vec<&'static str> {
    let canonical = canonical_name(entity_type);
    let is_element = BUILDING_ELEMENTS
        .iter()
        .chain(BUILDING_ELEMENTS_IFC2X3)
        .chain(BUILDING_ELEMENTS_IFC4)
        .any(|known| *known == canonical);

    if !is_element {
        return ELEMENT_ATTRIBUTES[..4].to_vec();
    }

    let mut names = ELEMENT_ATTRIBUTES.to_vec();
    names.extend_from_slice(attribute_tail(&canonical, version));
    names
}

/// IFC GlobalIds are 22 characters of the IFC base64 alphabet.
#[must_use]
pub fn is_global_id(value: &str) -> bool {
    value.len() == 22
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_names_follow_schema_spelling() {
        assert_eq!(canonical_name("IFCWALLSTANDARDCASE"), "IfcWallStandardCase");
        assert_eq!(canonical_name("IFCBUILDINGSTOREY"), "IfcBuildingStorey");
        assert_eq!(canonical_name("IFCSOMETHINGNEW"), "IfcSomethingnew");
        assert_eq!(canonical_name("CUSTOM"), "CUSTOM");
    }

    #[test]
    fn building_elements_depend_on_schema() {
        assert!(is_building_element("IFCWALL", SchemaVersion::Ifc2x3));
        assert!(is_building_element("IFCWALL", SchemaVersion::Ifc4));
        assert!(is_building_element("IFCREINFORCINGBAR", SchemaVersion::Ifc2x3));
        assert!(!is_building_element("IFCREINFORCINGBAR", SchemaVersion::Ifc4));
        assert!(is_building_element("IFCCHIMNEY", SchemaVersion::Ifc4));
        assert!(!is_building_element("IFCCHIMNEY", SchemaVersion::Ifc2x3));
        assert!(!is_building_element("IFCSPACE", SchemaVersion::Ifc4));
        assert!(!is_building_element("IFCWALLTYPE", SchemaVersion::Ifc4));
    }

    #[test]
    fn object_branch_excludes_other_root_branches() {
        assert!(is_object_type("IFCWALL", SchemaVersion::Ifc4));
        assert!(is_object_type("IFCBUILDINGSTOREY", SchemaVersion::Ifc4));
        assert!(!is_object_type("IFCRELAGGREGATES", SchemaVersion::Ifc4));
        assert!(!is_object_type("IFCPROPERTYSET", SchemaVersion::Ifc4));
        assert!(!is_object_type("IFCELEMENTQUANTITY", SchemaVersion::Ifc4));
        assert!(!is_object_type("IFCWALLTYPE", SchemaVersion::Ifc4));
        assert!(!is_object_type("IFCDOORSTYLE", SchemaVersion::Ifc2x3));
        assert!(!is_object_type("IFCPROJECT", SchemaVersion::Ifc4));
        assert!(is_object_type("IFCPROJECT", SchemaVersion::Ifc2x3));
    }

    #[test]
    fn ifc2x3_property_set_definitions_are_not_objects() {
        assert!(!is_object_type("IFCSOUNDVALUE", SchemaVersion::Ifc2x3));
        assert!(!is_object_type("IFCSERVICELIFE", SchemaVersion::Ifc2x3));
        assert!(!is_object_type("IfcServiceLifeFactor", SchemaVersion::Ifc2x3));
        assert!(!is_object_type("IFCSOUNDPROPERTIES", SchemaVersion::Ifc2x3));
    }

    #[test]
    fn door_attributes_differ_between_schemas() {
        assert_eq!(
            attribute_names("IFCDOOR", SchemaVersion::Ifc2x3)[8..].to_vec(),
            vec!["OverallHeight", "OverallWidth"]
        );
        assert_eq!(attribute_names("IFCDOOR", SchemaVersion::Ifc4).len(), 13);
        assert_eq!(attribute_names("IFCWALL", SchemaVersion::Ifc2x3).len(), 8);
        assert_eq!(attribute_names("IFCWALL", SchemaVersion::Ifc4)[8], "PredefinedType");
        assert_eq!(
            attribute_names("IFCBUILDINGSTOREY", SchemaVersion::Ifc4),
            vec!["GlobalId", "OwnerHistory", "Name", "Description"]
        );
    }

    #[test]
    fn schema_version_from_header() {
        assert_eq!(SchemaVersion::from_identifier("IFC2X3"), SchemaVersion::Ifc2x3);
        assert_eq!(SchemaVersion::from_identifier("IFC4"), SchemaVersion::Ifc4);
        assert_eq!(SchemaVersion::from_identifier("IFC4X3_ADD2"), SchemaVersion::Ifc4);
    }

    #[test]
    fn recognises_global_ids() {
        assert!(is_global_id("2O2Fr$t4X7Zf8NOew3FLOH"));
        assert!(!is_global_id("Pset_WallCommon"));
    }
}
