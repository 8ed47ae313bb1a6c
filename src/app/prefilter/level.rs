//! Vorfilter nach Geschoss.

use std::collections::HashSet;

use crate::core::{Document, EntityId};

/// Ein Geschoss im Katalog.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelEntry {
    /// ID der Geschoss-Entität
    pub id: EntityId,
    /// Anzeigename
    pub name: String,
    /// Höhenlage
    pub elevation: f64,
    /// Angehakt
    pub checked: bool,
}

/// Vereinigung aller Exemplare auf angehakten Geschossen.
#[derive(Debug, Clone, Default)]
pub struct LevelFilter {
    entries: Vec<LevelEntry>,
}

impl LevelFilter {
    /// Erstellt einen leeren Filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut den Katalog neu auf (nach Höhenlage, dann Name).
    pub fn init(&mut self, document: &dyn Document) {
        let previously_checked: HashSet<EntityId> = self.checked_ids().into_iter().collect();

        let mut entries: Vec<LevelEntry> = document
            .levels()
            .into_iter()
            .map(|level| LevelEntry {
                checked: previously_checked.contains(&level.id),
                id: level.id,
                name: level.name,
                elevation: level.elevation,
            })
            .collect();
        entries.sort_by(|a, b| {
            a.elevation
                .total_cmp(&b.elevation)
                .then_with(|| a.name.cmp(&b.name))
        });

        self.entries = entries;
    }

    /// Alle Katalogeinträge.
    pub fn entries(&self) -> &[LevelEntry] {
        &self.entries
    }

    /// Schaltet ein Geschoss um. Gibt `false` zurück, wenn es unbekannt ist.
    pub fn toggle(&mut self, id: EntityId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.checked = !entry.checked;
                true
            }
            None => false,
        }
    }

    /// Setzt den Haken eines Geschosses. Gibt `false` zurück, wenn es unbekannt ist.
    pub fn set_checked(&mut self, id: EntityId, checked: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.checked = checked;
                true
            }
            None => false,
        }
    }

    /// IDs aller angehakten Geschosse.
    pub fn checked_ids(&self) -> Vec<EntityId> {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .map(|e| e.id)
            .collect()
    }

    /// Alle Exemplare auf angehakten Geschossen; ohne Haken leer.
    pub fn filtered_elements(&self, document: &dyn Document) -> HashSet<EntityId> {
        self.checked_ids()
            .into_iter()
            .flat_map(|level| document.entities_at_level(level))
            .map(|entity| entity.id)
            .collect()
    }
}
