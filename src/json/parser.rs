//! Parser für Dokument-Snapshots im JSON-Format.

use crate::core::{
    Attribute, AttributeValue, BoxSolid, Document, Entity, EntityId, Level, MemoryDocument,
    RoomRelation, Solid, StorageKind, ViewId,
};
use anyhow::{bail, Context, Result};
use glam::DVec3;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    entities: Vec<EntityRecord>,
    #[serde(default)]
    levels: Vec<Level>,
    #[serde(default)]
    views: Vec<ViewRecord>,
    #[serde(default)]
    active_view: Option<ViewId>,
    #[serde(default)]
    categories: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct EntityRecord {
    id: EntityId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    is_type: bool,
    #[serde(default)]
    type_id: Option<EntityId>,
    #[serde(default)]
    attributes: Vec<AttributeRecord>,
    #[serde(default)]
    level: Option<EntityId>,
    #[serde(default)]
    room: Option<EntityId>,
    #[serde(default)]
    to_room: Option<EntityId>,
    #[serde(default)]
    from_room: Option<EntityId>,
    #[serde(default)]
    solids: Vec<BoxRecord>,
    #[serde(default)]
    geometry_unavailable: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttributeRecord {
    name: String,
    #[serde(default)]
    storage_kind: StorageKind,
    #[serde(default)]
    shared_id: Option<String>,
    #[serde(default)]
    builtin_code: Option<i64>,
    /// `null` bzw. fehlend = Parameter ohne Wert
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    unreadable: bool,
}

#[derive(Debug, Deserialize)]
struct BoxRecord {
    min: [f64; 3],
    max: [f64; 3],
}

#[derive(Debug, Deserialize)]
struct ViewRecord {
    id: ViewId,
    #[serde(default)]
    visible: Vec<EntityId>,
}

impl AttributeRecord {
    fn into_attribute(self) -> Attribute {
        let value = if self.unreadable {
            AttributeValue::Unreadable
        } else {
            match self.value {
                Some(text) => AttributeValue::Text(text),
                None => AttributeValue::Empty,
            }
        };

        let mut attribute = Attribute::new(&self.name, self.storage_kind, value);
        if let Some(shared_id) = self.shared_id.as_deref() {
            attribute = attribute.shared(shared_id);
        }
        if let Some(code) = self.builtin_code {
            attribute = attribute.builtin(code);
        }
        attribute
    }
}

/// Lädt einen Dokument-Snapshot aus einer Datei.
pub fn load_document(path: &std::path::Path) -> Result<MemoryDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Snapshot nicht lesbar: {}", path.display()))?;
    parse_document(&content)
        .with_context(|| format!("Snapshot ungültig: {}", path.display()))
}

/// Parsed einen Dokument-Snapshot aus einem JSON-String.
///
/// Typ-Verweise müssen auf Typ-Entitäten zeigen, Geschoss-Verweise auf Geschosse
/// und Raum-Verweise auf Entitäten des Snapshots. Die aktive Ansicht muss in
/// `views` stehen.
pub fn parse_document(json_content: &str) -> Result<MemoryDocument> {
    let record: DocumentRecord =
        serde_json::from_str(json_content).context("JSON-Struktur nicht lesbar")?;

    let mut known: HashSet<EntityId> = HashSet::with_capacity(record.entities.len());
    for entity in &record.entities {
        if !known.insert(entity.id) {
            bail!("Doppelte Entitäts-ID: {}", entity.id);
        }
    }
    let types: HashSet<EntityId> = record
        .entities
        .iter()
        .filter(|entity| entity.is_type)
        .map(|entity| entity.id)
        .collect();
    let levels: HashSet<EntityId> = record.levels.iter().map(|level| level.id).collect();

    if let Some(view) = record.active_view {
        if !record.views.iter().any(|v| v.id == view) {
            bail!("Aktive Ansicht {} fehlt in der Ansichtsliste", view);
        }
    }

    let mut document = MemoryDocument::new();
    for level in record.levels {
        document.add_level(level);
    }

    for (key, name) in &record.categories {
        document.set_category_name(key, name);
    }

    for entry in record.entities {
        let id = entry.id;

        if let Some(type_id) = entry.type_id {
            if !types.contains(&type_id) {
                bail!("Entität {}: unbekannter Typ {}", id, type_id);
            }
        }

        let relations = [
            (RoomRelation::Contained, entry.room),
            (RoomRelation::Destination, entry.to_room),
            (RoomRelation::Origin, entry.from_room),
        ];
        for (relation, room) in relations {
            let Some(room) = room else { continue };
            if !known.contains(&room) {
                bail!("Entität {}: unbekannter Raum {}", id, room);
            }
            document.assign_room(id, relation, room);
        }

        if let Some(level) = entry.level {
            if !levels.contains(&level) {
                bail!("Entität {}: unbekanntes Geschoss {}", id, level);
            }
            document.assign_level(id, level);
        }

        if let Some(reason) = entry.geometry_unavailable.as_deref() {
            document.mark_geometry_unavailable(id, reason);
        } else if !entry.solids.is_empty() {
            let solids: Vec<Arc<dyn Solid>> = entry
                .solids
                .iter()
                .map(|b| {
                    Arc::new(BoxSolid::new(DVec3::from(b.min), DVec3::from(b.max)))
                        as Arc<dyn Solid>
                })
                .collect();
            document.set_geometry(id, solids);
        }

        let mut entity = if entry.is_type {
            Entity::new_type(id, &entry.name, entry.category.as_deref())
        } else {
            Entity::new(id, &entry.name, entry.category.as_deref())
        };
        entity.type_id = entry.type_id;
        entity.attributes = entry
            .attributes
            .into_iter()
            .map(AttributeRecord::into_attribute)
            .collect();
        document.add_entity(entity);
    }

    for view in record.views {
        let unknown = view.visible.iter().filter(|id| !known.contains(id)).count();
        if unknown > 0 {
            log::warn!(
                "Ansicht {}: {} unbekannte Elemente ignoriert",
                view.id,
                unknown
            );
        }
        let visible = view
            .visible
            .into_iter()
            .filter(|id| known.contains(id))
            .collect();
        document.add_view(view.id, visible);
    }

    if let Some(view) = record.active_view {
        document.set_active_view(Some(view));
    }

    log::info!(
        "Snapshot geladen: {} Entitäten, {} Geschosse",
        document.entity_count(),
        document.levels().len()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntitySource;

    #[test]
    fn parses_entities_with_attribute_values() {
        let json = r#"{
            "entities": [
                { "id": 1, "name": "Wand", "category": "OST_Walls", "attributes": [
                    { "name": "Kommentar", "storage_kind": "text", "value": null },
                    { "name": "Marke", "storage_kind": "text", "value": "A", "shared_id": "abc" },
                    { "name": "Volumen", "storage_kind": "number", "unreadable": true }
                ]}
            ]
        }"#;

        let document = parse_document(json).expect("Snapshot gültig");
        let entity = document.entity(1).expect("Entität 1 vorhanden");

        assert_eq!(entity.attributes.len(), 3);
        assert_eq!(entity.attributes[0].value, AttributeValue::Empty);
        assert_eq!(entity.attributes[1].shared_id.as_deref(), Some("abc"));
        assert!(entity.attributes[1].is_shared);
        assert_eq!(entity.attributes[2].value, AttributeValue::Unreadable);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"{ "entities": [ { "id": 1 }, { "id": 1 } ] }"#;

        let error = parse_document(json).expect_err("Doppelte IDs müssen scheitern");
        assert!(error.to_string().contains("Doppelte"));
    }

    #[test]
    fn rejects_unknown_room_reference() {
        let json = r#"{ "entities": [ { "id": 1, "room": 99 } ] }"#;

        assert!(parse_document(json).is_err());
    }

    #[test]
    fn rejects_references_of_wrong_kind() {
        let type_is_instance = r#"{ "entities": [ { "id": 1 }, { "id": 2, "type_id": 1 } ] }"#;
        let error = parse_document(type_is_instance).expect_err("Instanz als Typ muss scheitern");
        assert!(error.to_string().contains("unbekannter Typ"));

        let type_is_level = r#"{
            "levels": [ { "id": 101, "name": "EG", "elevation": 0.0 } ],
            "entities": [ { "id": 2, "type_id": 101 } ]
        }"#;
        assert!(parse_document(type_is_level).is_err());

        let level_is_entity = r#"{ "entities": [ { "id": 1 }, { "id": 2, "level": 1 } ] }"#;
        let error =
            parse_document(level_is_entity).expect_err("Entität als Geschoss muss scheitern");
        assert!(error.to_string().contains("unbekanntes Geschoss"));
    }

    #[test]
    fn rejects_active_view_without_view_entry() {
        let json = r#"{
            "entities": [ { "id": 1 } ],
            "views": [ { "id": 7, "visible": [1] } ],
            "active_view": 8
        }"#;

        let error = parse_document(json).expect_err("Unbekannte aktive Ansicht muss scheitern");
        assert!(error.to_string().contains("Aktive Ansicht 8"));
    }

    #[test]
    fn drops_unknown_view_members() {
        let json = r#"{
            "entities": [ { "id": 1 } ],
            "views": [ { "id": 7, "visible": [1, 42] } ],
            "active_view": 7
        }"#;

        let document = parse_document(json).expect("Snapshot gültig");

        assert_eq!(document.active_view(), Some(7));
        let visible: Vec<EntityId> = document
            .entities_visible_in_view(7)
            .iter()
            .map(|entity| entity.id)
            .collect();
        assert_eq!(visible, vec![1]);
    }
}
