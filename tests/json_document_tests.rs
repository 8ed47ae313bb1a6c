use approx::assert_relative_eq;
use select_more::core::{DetailLevel, EntitySource, GeometryError, RoomRelation};
use select_more::{load_document, parse_document, Document};

const SNAPSHOT: &str = include_str!("fixtures/sample_document.json");

#[test]
fn test_parse_sample_document() {
    let document = parse_document(SNAPSHOT).expect("Snapshot sollte gültig sein");

    assert_eq!(document.entity_count(), 7);
    assert_eq!(document.non_type_entities().len(), 6);
    assert_eq!(document.levels().len(), 2);
    assert_eq!(document.active_view(), Some(1));
    assert_eq!(
        document.category_name("OST_Walls").as_deref(),
        Some("Wände")
    );
    assert_eq!(document.level_of(2), Some(102));
    assert_eq!(document.room_of(3, RoomRelation::Destination), Some(50));
    assert_eq!(document.room_of(4, RoomRelation::Contained), Some(50));

    let wall = document.entity(1).expect("Wand vorhanden");
    assert_eq!(wall.type_id, Some(10));
    assert!(document.entity(10).is_some_and(|entity| entity.is_type));
}

#[test]
fn test_solids_become_boxes() {
    let document = parse_document(SNAPSHOT).expect("Snapshot sollte gültig sein");

    let bounds = document.bounding_box(50).expect("Raum hat Geometrie");
    assert_relative_eq!(bounds.min.y, 0.2);
    assert_relative_eq!(bounds.max.x, 10.0);

    let solids = document
        .geometry_of(4, DetailLevel::Fine)
        .expect("Stütze hat Geometrie");
    assert_eq!(solids.len(), 1);
    assert_relative_eq!(solids[0].volume(), 3.0);

    assert!(document.bounding_box(3).is_none());
}

#[test]
fn test_unavailable_geometry_is_reported() {
    let document = parse_document(SNAPSHOT).expect("Snapshot sollte gültig sein");

    match document.geometry_of(60, DetailLevel::Fine) {
        Err(GeometryError::Unavailable(reason)) => assert_eq!(reason, "Raum nicht umschlossen"),
        Err(other) => panic!("Unerwarteter Fehler: {other}"),
        Ok(solids) => panic!("Unerwartete Geometrie: {} Körper", solids.len()),
    }
}

#[test]
fn test_invalid_json_is_rejected() {
    let without_id = r#"{ "entities": [ { "name": "ohne ID" } ] }"#;
    assert!(parse_document(without_id).is_err());
    assert!(parse_document("kein json").is_err());
}

#[test]
fn test_load_document_reports_missing_file() {
    let error = load_document(std::path::Path::new("tests/fixtures/fehlt.json"))
        .expect_err("Fehlende Datei muss scheitern");

    assert!(format!("{error:#}").contains("fehlt.json"));
}
