//! Host-Schnittstelle: lesender Zugriff auf ein Dokument.
//!
//! Alle Abfragen laufen auf dem privilegierten Host-Thread und sehen für die
//! Dauer eines Handler-Aufrufs einen stabilen Stand.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Level};
use super::geometry::{Aabb, GeometryError, Solid};

/// ID einer Ansicht im Host.
pub type ViewId = u64;

/// Detailgrad der angeforderten Geometrie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Grob
    Coarse,
    /// Mittel
    Medium,
    /// Fein (Standard für die Kontakterkennung)
    #[default]
    Fine,
}

/// Beziehung einer Entität zu einem Raum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomRelation {
    /// Entität liegt im Raum
    Contained,
    /// Zielraum (z.B. Türaufschlag)
    Destination,
    /// Herkunftsraum
    Origin,
}

/// Minimaler Lookup nach ID.
pub trait EntitySource {
    /// Liefert die Entität zur ID.
    fn entity(&self, id: EntityId) -> Option<&Entity>;
}

/// Lesender Zugriff auf ein Host-Dokument.
pub trait Document: EntitySource {
    /// Alle Entitäten inklusive Typen, in Dokument-Reihenfolge.
    fn entities(&self) -> Vec<&Entity>;

    /// Anzeigename einer Kategorie, falls der Host einen kennt.
    fn category_name(&self, _category: &str) -> Option<String> {
        None
    }

    /// Aktive räumliche Ansicht.
    fn active_view(&self) -> Option<ViewId>;

    /// Alle in der Ansicht sichtbaren Entitäten.
    fn entities_visible_in_view(&self, view: ViewId) -> Vec<&Entity>;

    /// Alle Geschosse (unsortiert).
    fn levels(&self) -> Vec<Level>;

    /// Geschoss, dem eine Entität zugeordnet ist.
    fn level_of(&self, entity: EntityId) -> Option<EntityId>;

    /// Raum einer Entität in der gegebenen Beziehung.
    fn room_of(&self, entity: EntityId, relation: RoomRelation) -> Option<EntityId>;

    /// Achsenparalleles Hüllvolumen einer Entität.
    fn bounding_box(&self, entity: EntityId) -> Option<Aabb>;

    /// Volumenkörper einer Entität.
    fn geometry_of(
        &self,
        entity: EntityId,
        detail: DetailLevel,
    ) -> Result<Vec<Arc<dyn Solid>>, GeometryError>;

    /// Alle Entitäten, die keine Typen sind.
    fn non_type_entities(&self) -> Vec<&Entity> {
        self.entities().into_iter().filter(|e| !e.is_type).collect()
    }

    /// Alle Exemplare einer Kategorie.
    fn entities_of_category(&self, category: &str) -> Vec<&Entity> {
        self.non_type_entities()
            .into_iter()
            .filter(|e| e.category.as_deref() == Some(category))
            .collect()
    }

    /// Alle Exemplare auf einem Geschoss.
    fn entities_at_level(&self, level: EntityId) -> Vec<&Entity> {
        self.non_type_entities()
            .into_iter()
            .filter(|e| self.level_of(e.id) == Some(level))
            .collect()
    }

    /// Alle Exemplare mit der gegebenen Raumbeziehung.
    fn entities_in_room(&self, room: EntityId, relation: RoomRelation) -> Vec<&Entity> {
        self.non_type_entities()
            .into_iter()
            .filter(|e| self.room_of(e.id, relation) == Some(room))
            .collect()
    }

    /// Alle Räume des Dokuments.
    fn rooms(&self) -> Vec<&Entity> {
        self.non_type_entities()
            .into_iter()
            .filter(|e| e.is_room())
            .collect()
    }
}
