//! Reference manufacturing dataset
//!
//! A fingerprint-sensor module supply chain: headquarters, an overseas
//! subsidiary, its SMT and assembly lines, inspection equipment,
//! components, the intermediate sensor module, the finished module and
//! the customer factory it ships to.

use super::types::{
    DataType, LinkType, ObjectSource, ObjectType, OntologyData, Property, PropertyType,
};

fn mapped(name: &str, description: &str, label: &str, properties: Vec<Property>) -> ObjectType {
    let mut obj = ObjectType::new(name)
        .with_description(description)
        .with_source(ObjectSource::AiMapped)
        .with_label(label);
    obj.properties = properties;
    obj
}

fn prop(id: &str, name: &str, type_tag: &str) -> Property {
    Property::new(id, name, type_tag).required()
}

fn catalog(name: &str, data_type: DataType, description: &str, used_by: &str) -> PropertyType {
    let mut p = PropertyType::new(name, data_type);
    p.description = description.to_string();
    p.used_by = vec![used_by.to_string()];
    p.source = ObjectSource::AiMapped;
    p
}

/// The reference schema used by `seed` and by tests
pub fn reference_dataset() -> OntologyData {
    let object_types = vec![
        mapped("Global_HQ", "Headquarters", "HQ", vec![prop("h1", "Location", "string")]),
        mapped(
            "Vina_Subsidiary",
            "Overseas subsidiary running the Vina 1/2 plants",
            "Subsidiary",
            vec![prop("v1", "Region", "string")],
        ),
        mapped(
            "SMT_Line",
            "Surface mount technology line (PBA manufacturing)",
            "Line",
            vec![
                prop("sm1", "Utilization", "number"),
                prop("sm2", "Efficiency", "number"),
            ],
        ),
        mapped(
            "Assembly_Line",
            "Final module assembly line",
            "Line",
            vec![prop("as1", "Yield_Rate", "number")],
        ),
        mapped(
            "Inspection_AOI",
            "Automated optical inspection equipment",
            "Equipment",
            vec![prop("in1", "False_Call_Rate", "number")],
        ),
        mapped(
            "IC_Chip",
            "Fingerprint recognition IC",
            "Component",
            vec![prop("c1", "Stock_Level", "number")],
        ),
        mapped(
            "FPCB_Board",
            "Flexible printed circuit board",
            "Component",
            vec![prop("f1", "Unit_Price", "number")],
        ),
        mapped(
            "Sensor_Module",
            "Semi-finished sensor module",
            "Module",
            vec![prop("m1", "WIP_Count", "number")],
        ),
        mapped(
            "Galaxy_S24_Module",
            "Finished module delivered to the handset maker",
            "Product",
            vec![prop("fm1", "Quality_Grade", "string")],
        ),
        mapped(
            "SEC_Factory",
            "Customer smartphone assembly plant",
            "Customer",
            vec![prop("sec1", "Delivery_Schedule", "string")],
        ),
    ];

    let link_types = vec![
        LinkType::new("MANAGES", "Global_HQ", "Vina_Subsidiary").bidirectional(),
        LinkType::new("OPERATES", "Vina_Subsidiary", "SMT_Line"),
        LinkType::new("OPERATES", "Vina_Subsidiary", "Assembly_Line"),
        LinkType::new("CONSUMES", "SMT_Line", "IC_Chip"),
        LinkType::new("CONSUMES", "SMT_Line", "FPCB_Board"),
        LinkType::new("PRODUCES", "SMT_Line", "Sensor_Module"),
        LinkType::new("VERIFIES", "Inspection_AOI", "Sensor_Module"),
        LinkType::new("FEEDS_INTO", "Sensor_Module", "Assembly_Line"),
        LinkType::new("FINISHES", "Assembly_Line", "Galaxy_S24_Module"),
        LinkType::new("SHIPS_TO", "Galaxy_S24_Module", "SEC_Factory"),
    ];

    let property_types = vec![
        catalog("Utilization", DataType::Number, "Line utilization", "SMT_Line"),
        catalog("Yield_Rate", DataType::Number, "Yield", "Assembly_Line"),
        catalog("Stock_Level", DataType::Number, "Stock level", "IC_Chip"),
        catalog("Unit_Price", DataType::Number, "Unit price", "FPCB_Board"),
    ];

    OntologyData {
        object_types,
        property_types,
        link_types,
        action_types: Vec::new(),
    }
}
