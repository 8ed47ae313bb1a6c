//! Spatial-Index (KD-Tree) über Hüllquadern für die Grobauswahl der Kontakterkennung.

use std::collections::HashMap;

use kiddo::{KdTree, SquaredEuclidean};

use super::document::Document;
use super::entity::EntityId;
use super::geometry::Aabb;

/// Read-only Spatial-Index über den Hüllquadern aller Entitäten eines Dokuments.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 3>,
    entity_ids: Vec<EntityId>,
    /// Entitäten je Baumeintrag; Quader mit gleichem Mittelpunkt teilen sich einen Eintrag
    groups: Vec<Vec<EntityId>>,
    bounds: HashMap<EntityId, Aabb>,
    /// Größte halbe Raumdiagonale aller indexierten Quader
    max_half_diagonal: f64,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            entity_ids: Vec::new(),
            groups: Vec::new(),
            bounds: HashMap::new(),
            max_half_diagonal: 0.0,
        }
    }

    /// Baut einen neuen Index aus den übergebenen Hüllquadern.
    pub fn from_bounds(bounds: HashMap<EntityId, Aabb>) -> Self {
        let mut entity_ids: Vec<EntityId> = bounds.keys().copied().collect();
        entity_ids.sort_unstable();

        // Der KD-Tree kann nur eine Bucket-Größe identischer Punkte aufnehmen
        let mut slots: HashMap<[u64; 3], usize> = HashMap::new();
        let mut entries: Vec<[f64; 3]> = Vec::new();
        let mut groups: Vec<Vec<EntityId>> = Vec::new();
        for id in &entity_ids {
            let Some(center) = bounds.get(id).map(|b| b.center().to_array()) else {
                continue;
            };
            let key = center.map(f64::to_bits);
            let slot = *slots.entry(key).or_insert_with(|| {
                entries.push(center);
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(*id);
        }

        let tree: KdTree<f64, 3> = (&entries).into();

        let max_half_diagonal = bounds
            .values()
            .map(Aabb::half_diagonal)
            .fold(0.0_f64, f64::max);

        Self {
            tree,
            entity_ids,
            groups,
            bounds,
            max_half_diagonal,
        }
    }

    /// Baut den Index über alle Nicht-Typ-Entitäten mit Hüllquader.
    pub fn from_document(document: &dyn Document) -> Self {
        let bounds = document
            .non_type_entities()
            .into_iter()
            .filter_map(|entity| document.bounding_box(entity.id).map(|b| (entity.id, b)))
            .collect();
        Self::from_bounds(bounds)
    }

    /// Gibt die Anzahl indexierter Entitäten zurück.
    pub fn len(&self) -> usize {
        self.entity_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Entitäten im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_empty()
    }

    /// Hüllquader einer indexierten Entität.
    pub fn bounds_of(&self, id: EntityId) -> Option<&Aabb> {
        self.bounds.get(&id)
    }

    /// Findet alle Entitäten, deren Hüllquader `query` schneidet (aufsteigend nach ID).
    ///
    /// Nutzt den KD-Tree mit einer umschließenden Kugelabfrage um den
    /// Query-Mittelpunkt + exakte Quader-Prüfung als Nachfilter.
    pub fn intersecting(&self, query: &Aabb) -> Vec<EntityId> {
        if self.is_empty() {
            return Vec::new();
        }

        // Zwei Quader können sich nur schneiden, wenn ihre Mittelpunkte
        // höchstens die Summe der halben Diagonalen auseinander liegen.
        let radius = query.half_diagonal() + self.max_half_diagonal;

        let mut ids: Vec<EntityId> = self
            .tree
            .within::<SquaredEuclidean>(&query.center().to_array(), radius * radius)
            .into_iter()
            .filter_map(|entry| self.groups.get(entry.item as usize))
            .flatten()
            .copied()
            .filter(|entity_id| {
                self.bounds
                    .get(entity_id)
                    .is_some_and(|bounds| bounds.intersects(query))
            })
            .collect();

        ids.sort_unstable();
        ids
    }
}
