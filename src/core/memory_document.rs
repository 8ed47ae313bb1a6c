//! In-Memory-Dokument als Referenz-Implementierung der Host-Schnittstelle.
//!
//! Wird vom JSON-Loader befüllt und in Tests direkt aufgebaut.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;

use super::document::{DetailLevel, Document, EntitySource, RoomRelation, ViewId};
use super::entity::{Entity, EntityId, Level};
use super::geometry::{Aabb, GeometryError, Solid};

/// Dokument-Schnappschuss im Speicher.
#[derive(Debug, Default, Clone)]
pub struct MemoryDocument {
    /// Entitäten in Dokument-Reihenfolge
    entities: IndexMap<EntityId, Entity>,
    levels: Vec<Level>,
    level_of: HashMap<EntityId, EntityId>,
    rooms: HashMap<(EntityId, RoomRelation), EntityId>,
    views: IndexMap<ViewId, Vec<EntityId>>,
    active_view: Option<ViewId>,
    category_names: HashMap<String, String>,
    geometry: HashMap<EntityId, Vec<Arc<dyn Solid>>>,
    /// Entitäten, deren Geometrie der Host nicht liefern kann (mit Grund)
    unavailable_geometry: HashMap<EntityId, String>,
}

impl MemoryDocument {
    /// Erstellt ein leeres Dokument.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt eine Entität hinzu oder ersetzt sie (Position bleibt erhalten).
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.id, entity);
    }

    /// Anzahl aller Entitäten inklusive Typen.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Fügt ein Geschoss hinzu.
    pub fn add_level(&mut self, level: Level) {
        self.levels.push(level);
    }

    /// Ordnet eine Entität einem Geschoss zu.
    pub fn assign_level(&mut self, entity: EntityId, level: EntityId) {
        self.level_of.insert(entity, level);
    }

    /// Ordnet eine Entität einem Raum in der gegebenen Beziehung zu.
    pub fn assign_room(&mut self, entity: EntityId, relation: RoomRelation, room: EntityId) {
        self.rooms.insert((entity, relation), room);
    }

    /// Legt eine Ansicht mit ihren sichtbaren Entitäten an.
    pub fn add_view(&mut self, view: ViewId, visible: Vec<EntityId>) {
        self.views.insert(view, visible);
    }

    /// Setzt die aktive Ansicht (`None` = keine räumliche Ansicht aktiv).
    pub fn set_active_view(&mut self, view: Option<ViewId>) {
        self.active_view = view;
    }

    /// Hinterlegt den Anzeigenamen einer Kategorie.
    pub fn set_category_name(&mut self, category: &str, name: &str) {
        self.category_names
            .insert(category.to_string(), name.to_string());
    }

    /// Setzt die Volumenkörper einer Entität.
    pub fn set_geometry(&mut self, entity: EntityId, solids: Vec<Arc<dyn Solid>>) {
        self.unavailable_geometry.remove(&entity);
        self.geometry.insert(entity, solids);
    }

    /// Markiert die Geometrie einer Entität als nicht lesbar.
    pub fn mark_geometry_unavailable(&mut self, entity: EntityId, reason: &str) {
        self.geometry.remove(&entity);
        self.unavailable_geometry.insert(entity, reason.to_string());
    }
}

impl EntitySource for MemoryDocument {
    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }
}

impl Document for MemoryDocument {
    fn entities(&self) -> Vec<&Entity> {
        self.entities.values().collect()
    }

    fn category_name(&self, category: &str) -> Option<String> {
        self.category_names.get(category).cloned()
    }

    fn active_view(&self) -> Option<ViewId> {
        self.active_view
    }

    fn entities_visible_in_view(&self, view: ViewId) -> Vec<&Entity> {
        let Some(visible) = self.views.get(&view) else {
            return Vec::new();
        };
        let visible: HashSet<EntityId> = visible.iter().copied().collect();
        self.entities
            .values()
            .filter(|e| visible.contains(&e.id))
            .collect()
    }

    fn levels(&self) -> Vec<Level> {
        self.levels.clone()
    }

    fn level_of(&self, entity: EntityId) -> Option<EntityId> {
        self.level_of.get(&entity).copied()
    }

    fn room_of(&self, entity: EntityId, relation: RoomRelation) -> Option<EntityId> {
        self.rooms.get(&(entity, relation)).copied()
    }

    fn bounding_box(&self, entity: EntityId) -> Option<Aabb> {
        let solids = self.geometry.get(&entity)?;
        Aabb::enclosing(solids.iter().map(|solid| solid.bounding_box()))
    }

    fn geometry_of(
        &self,
        entity: EntityId,
        _detail: DetailLevel,
    ) -> Result<Vec<Arc<dyn Solid>>, GeometryError> {
        if let Some(reason) = self.unavailable_geometry.get(&entity) {
            return Err(GeometryError::Unavailable(reason.clone()));
        }
        Ok(self.geometry.get(&entity).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::BoxSolid;
    use glam::DVec3;

    #[test]
    fn view_visibility_keeps_document_order() {
        let mut doc = MemoryDocument::new();
        doc.add_entity(Entity::new(3, "c", None));
        doc.add_entity(Entity::new(1, "a", None));
        doc.add_entity(Entity::new(2, "b", None));
        doc.add_view(7, vec![2, 3]);

        let ids: Vec<EntityId> = doc
            .entities_visible_in_view(7)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
        assert!(doc.entities_visible_in_view(8).is_empty());
    }

    #[test]
    fn bounding_box_encloses_all_solids() {
        let mut doc = MemoryDocument::new();
        doc.add_entity(Entity::new(1, "Stütze", Some("OST_Columns")));
        doc.set_geometry(
            1,
            vec![
                Arc::new(BoxSolid::new(DVec3::ZERO, DVec3::ONE)),
                Arc::new(BoxSolid::new(DVec3::splat(2.0), DVec3::splat(3.0))),
            ],
        );

        let bounds = doc.bounding_box(1).expect("Hüllquader erwartet");
        assert_eq!(bounds.min, DVec3::ZERO);
        assert_eq!(bounds.max, DVec3::splat(3.0));
        assert!(doc.bounding_box(2).is_none());
    }

    #[test]
    fn unavailable_geometry_reports_error() {
        let mut doc = MemoryDocument::new();
        doc.add_entity(Entity::new(1, "Raum", Some(crate::core::ROOM_CATEGORY)));
        doc.mark_geometry_unavailable(1, "Raum nicht geschlossen");

        assert!(matches!(
            doc.geometry_of(1, DetailLevel::Fine),
            Err(GeometryError::Unavailable(_))
        ));
        assert!(doc
            .geometry_of(2, DetailLevel::Fine)
            .expect("leere Geometrie")
            .is_empty());
    }

    #[test]
    fn relation_queries_filter_non_type_entities() {
        let mut doc = MemoryDocument::new();
        doc.add_entity(Entity::new(1, "Raum", Some(crate::core::ROOM_CATEGORY)));
        doc.add_entity(Entity::new(2, "Tür", Some("OST_Doors")));
        doc.add_entity(Entity::new_type(3, "Türtyp", Some("OST_Doors")));
        doc.assign_room(2, RoomRelation::Destination, 1);
        doc.assign_room(3, RoomRelation::Destination, 1);
        doc.assign_level(2, 100);

        let ids: Vec<EntityId> = doc
            .entities_in_room(1, RoomRelation::Destination)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![2]);
        assert!(doc.entities_in_room(1, RoomRelation::Origin).is_empty());
        assert_eq!(doc.entities_at_level(100).len(), 1);
        assert_eq!(doc.rooms().len(), 1);
    }
}
