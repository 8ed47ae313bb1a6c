//! Vorfilter nach Kategorie mit Katalog, Suche und Mehrfachauswahl.

use std::collections::{BTreeMap, HashSet};

use crate::core::{category_label, Document, EntityId};

/// Eine Kategorie im Katalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Kategorie-Schlüssel
    pub key: String,
    /// Anzeigename
    pub label: String,
    /// Anzahl der Exemplare im Dokument
    pub count: usize,
    /// Angehakt
    pub checked: bool,
}

/// Vereinigung aller Exemplare der angehakten Kategorien.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    entries: Vec<CategoryEntry>,
    search_text: String,
}

impl CategoryFilter {
    /// Erstellt einen leeren Filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut den Katalog neu auf (sortiert nach Anzeigename).
    ///
    /// Angehakte Kategorien, die im neuen Dokument noch vorkommen, bleiben angehakt.
    pub fn init(&mut self, document: &dyn Document) {
        let previously_checked: HashSet<String> = self
            .entries
            .iter()
            .filter(|entry| entry.checked)
            .map(|entry| entry.key.clone())
            .collect();

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entity in document.non_type_entities() {
            if let Some(category) = entity.category.as_deref() {
                *counts.entry(category).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<CategoryEntry> = counts
            .into_iter()
            .map(|(key, count)| CategoryEntry {
                key: key.to_string(),
                label: category_label(document, key),
                count,
                checked: previously_checked.contains(key),
            })
            .collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.key.cmp(&b.key)));

        log::debug!("Kategorie-Katalog: {} Einträge", entries.len());
        self.entries = entries;
    }

    /// Alle Katalogeinträge.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Aktueller Suchtext.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Setzt den Suchtext.
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    /// Leert den Suchtext.
    pub fn clear_search(&mut self) {
        self.search_text.clear();
    }

    fn is_visible(&self, entry: &CategoryEntry) -> bool {
        let needle = self.search_text.trim();
        needle.is_empty() || entry.label.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Einträge, die zur Suche passen (Teilstring, ohne Groß-/Kleinschreibung).
    pub fn visible_entries(&self) -> Vec<&CategoryEntry> {
        self.entries.iter().filter(|e| self.is_visible(e)).collect()
    }

    /// Hakt alle sichtbaren Einträge an.
    pub fn select_all_visible(&mut self) {
        self.update_visible(|_| true);
    }

    /// Invertiert die sichtbaren Einträge.
    pub fn invert_visible(&mut self) {
        self.update_visible(|checked| !checked);
    }

    fn update_visible(&mut self, update: impl Fn(bool) -> bool) {
        let needle = self.search_text.trim().to_lowercase();
        for entry in &mut self.entries {
            if needle.is_empty() || entry.label.to_lowercase().contains(&needle) {
                entry.checked = update(entry.checked);
            }
        }
    }

    /// Entfernt alle Haken (auch ausgeblendete).
    pub fn deselect_all(&mut self) {
        for entry in &mut self.entries {
            entry.checked = false;
        }
    }

    /// Schaltet eine Kategorie um. Gibt `false` zurück, wenn sie unbekannt ist.
    pub fn toggle(&mut self, key: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.checked = !entry.checked;
                true
            }
            None => false,
        }
    }

    /// Setzt den Haken einer Kategorie. Gibt `false` zurück, wenn sie unbekannt ist.
    pub fn set_checked(&mut self, key: &str, checked: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Entfernt den Haken einer Kategorie.
    pub fn remove(&mut self, key: &str) -> bool {
        self.set_checked(key, false)
    }

    /// Schlüssel aller angehakten Kategorien in Katalogreihenfolge.
    pub fn checked_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .map(|e| e.key.as_str())
            .collect()
    }

    /// Alle Exemplare der angehakten Kategorien; ohne Haken leer.
    pub fn filtered_elements(&self, document: &dyn Document) -> HashSet<EntityId> {
        self.checked_keys()
            .into_iter()
            .flat_map(|key| document.entities_of_category(key))
            .map(|entity| entity.id)
            .collect()
    }
}
