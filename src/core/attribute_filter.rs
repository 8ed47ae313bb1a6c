//! Parameter-Filter aus Stichproben und die geordnete Filterkette.
//!
//! Ein `AttributeFilter` ist ein unveränderlicher Schnappschuss aus Identität
//! und normalisiertem Wert. Er hält keine Referenz auf Host-Objekte und
//! überlebt damit die Entität, aus der er erfasst wurde.

use std::collections::HashMap;

use super::document::EntitySource;
use super::entity::{Attribute, Entity, EntityId, OwnerScope, StorageKind};
use super::identity::AttributeIdentity;

/// Session-weit eindeutige ID eines Parameter-Filters.
pub type FilterId = u64;

/// Anzeigename für Parameter ohne Namen.
pub const UNKNOWN_ATTRIBUTE_LABEL: &str = "Unbekannter Parameter";

/// Normalisiert einen Anzeigewert: trimmen, Whitespace-Folgen (inkl.
/// Zeilenumbrüchen) zu einem Leerzeichen zusammenfassen.
pub fn normalize_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Liefert alle Parameter, die eine Stichprobe aus `entity` erfasst:
/// zuerst die eigenen, danach die der Typ-Entität (Ebene `Type`).
pub fn sample_attributes<'a, S>(
    entity: &'a Entity,
    source: &'a S,
) -> Vec<(&'a Attribute, OwnerScope)>
where
    S: EntitySource + ?Sized,
{
    let mut sampled: Vec<(&Attribute, OwnerScope)> = entity
        .attributes
        .iter()
        .map(|attribute| (attribute, entity.owner_scope()))
        .collect();

    if let Some(entity_type) = entity.type_id.and_then(|id| source.entity(id)) {
        sampled.extend(
            entity_type
                .attributes
                .iter()
                .map(|attribute| (attribute, OwnerScope::Type)),
        );
    }

    sampled
}

/// Erfasstes (Identität, Wert)-Prädikat.
#[derive(Debug, Clone)]
pub struct AttributeFilter {
    id: FilterId,
    label: String,
    identity: AttributeIdentity,
    /// Getrimmter Anzeigewert (für die Darstellung)
    display_value: Option<String>,
    /// Normalisierter Vergleichswert; `None` = nicht lesbar, passt nie
    captured_value: Option<String>,
}

impl AttributeFilter {
    /// Erfasst einen Parameter als Filter.
    pub fn capture(id: FilterId, attribute: &Attribute, owner_scope: OwnerScope) -> Self {
        let label = if attribute.name.is_empty() {
            UNKNOWN_ATTRIBUTE_LABEL.to_string()
        } else {
            attribute.name.clone()
        };
        let readable = attribute.value.readable_text();

        Self {
            id,
            label,
            identity: AttributeIdentity::of(attribute, owner_scope),
            display_value: readable.map(|text| text.trim().to_string()),
            captured_value: readable.map(normalize_value),
        }
    }

    /// ID des Filters.
    pub fn id(&self) -> FilterId {
        self.id
    }

    /// Anzeigename des erfassten Parameters.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Erfasste Identität.
    pub fn identity(&self) -> &AttributeIdentity {
        &self.identity
    }

    /// Ebene, von der der Parameter stammt.
    pub fn owner_scope(&self) -> OwnerScope {
        self.identity.owner_scope
    }

    /// Getrimmter Anzeigewert.
    pub fn display_value(&self) -> Option<&str> {
        self.display_value.as_deref()
    }

    /// Prüft einen einzelnen Parameter gegen den Filter.
    pub fn matches(&self, attribute: &Attribute, owner_scope: OwnerScope) -> bool {
        let Some(expected) = self.captured_value.as_deref() else {
            return false;
        };
        if !self.identity.matches(attribute, owner_scope) {
            return false;
        }
        attribute
            .value
            .readable_text()
            .is_some_and(|text| normalize_value(text) == expected)
    }

    /// Prüft nur die eigenen Parameter einer Entität.
    fn passes_own(&self, entity: &Entity) -> bool {
        let scope = entity.owner_scope();
        entity
            .attributes
            .iter()
            .any(|attribute| self.matches(attribute, scope))
    }

    /// Prüft eine Entität: Typ-Entität (eine Ebene) oder eigene Parameter.
    pub fn passes<S>(&self, entity: &Entity, source: &S) -> bool
    where
        S: EntitySource + ?Sized,
    {
        if let Some(entity_type) = entity.type_id.and_then(|id| source.entity(id)) {
            if self.passes_own(entity_type) {
                return true;
            }
        }
        self.passes_own(entity)
    }

    /// Filtert eine Folge von Entitäten; jede ID wird pro Aufruf nur einmal ausgewertet.
    pub fn passes_all<'a, S>(&self, entities: &[&'a Entity], source: &S) -> Vec<&'a Entity>
    where
        S: EntitySource + ?Sized,
    {
        let mut memory: HashMap<EntityId, bool> = HashMap::with_capacity(entities.len());
        entities
            .iter()
            .copied()
            .filter(|entity| {
                *memory
                    .entry(entity.id)
                    .or_insert_with(|| self.passes(entity, source))
            })
            .collect()
    }

    /// Kurzform des Werts für Listen (Zeilenumbrüche entfernt, gekürzt).
    pub fn short_value(&self, max_chars: usize) -> String {
        let Some(value) = self.display_value.as_deref() else {
            return String::new();
        };
        let value = value.replace(['\n', '\r'], " ");
        let value = value.trim();
        if value.chars().count() <= max_chars {
            return value.to_string();
        }
        let keep = max_chars.saturating_sub(3);
        let mut short: String = value.chars().take(keep).collect();
        short.push_str("...");
        short
    }

    /// Lesbare Bezeichnung der Speicherart.
    pub fn friendly_storage_kind(&self) -> &'static str {
        match self.identity.storage_kind {
            StorageKind::Text => "Text",
            StorageKind::Number => "Zahl",
            StorageKind::Integer => "Ganzzahl",
            StorageKind::Reference => "Element",
            StorageKind::None => "Keine",
        }
    }

    /// Technische Details für Tooltips.
    pub fn technical_details(&self) -> String {
        let mut details = format!(
            "Name: {}\nOwner: {}\nStorage: {}\n",
            self.label,
            self.owner_scope().as_str(),
            self.friendly_storage_kind()
        );
        if let (true, Some(shared_id)) = (self.identity.is_shared, &self.identity.shared_id) {
            details.push_str(&format!("Shared GUID: {shared_id}\n"));
        } else if let Some(code) = self.identity.builtin_code {
            details.push_str(&format!("Built-in id: {code}\n"));
        }
        details
    }
}

/// Geordnete Kette von Parameter-Filtern (UND in Deklarationsreihenfolge).
#[derive(Debug, Clone, Default)]
pub struct AttributeFilterChain {
    filters: Vec<AttributeFilter>,
}

impl AttributeFilterChain {
    /// Erstellt eine leere Kette.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Anzahl der Filter.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Gibt `true` zurück, wenn keine Filter vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Read-only Sicht auf alle Filter.
    pub fn filters(&self) -> &[AttributeFilter] {
        &self.filters
    }

    /// Findet einen Filter per ID.
    pub fn get(&self, id: FilterId) -> Option<&AttributeFilter> {
        self.filters.iter().find(|f| f.id() == id)
    }

    /// Hängt Filter ans Ende der Kette.
    pub fn extend(&mut self, filters: impl IntoIterator<Item = AttributeFilter>) {
        self.filters.extend(filters);
    }

    /// Entfernt alle Filter mit den gegebenen IDs.
    ///
    /// Gibt die ID des Filters zurück, der danach an der kleinsten
    /// entfernten Position steht (Nachfolger für die Zeilenauswahl).
    pub fn remove(&mut self, ids: &[FilterId]) -> Option<FilterId> {
        let first_index = self
            .filters
            .iter()
            .position(|filter| ids.contains(&filter.id()))?;
        self.filters.retain(|filter| !ids.contains(&filter.id()));
        self.filters.get(first_index).map(AttributeFilter::id)
    }

    /// Entfernt alle Filter.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Wendet alle Filter nacheinander an; jeder sieht nur die Überlebenden des vorigen.
    pub fn apply<'a, S>(&self, entities: Vec<&'a Entity>, source: &S) -> Vec<&'a Entity>
    where
        S: EntitySource + ?Sized,
    {
        self.filters
            .iter()
            .fold(entities, |survivors, filter| {
                filter.passes_all(&survivors, source)
            })
    }

    /// Gibt `true` zurück, wenn mindestens ein Filter die Entität durchlässt.
    pub fn any_passes<S>(&self, entity: &Entity, source: &S) -> bool
    where
        S: EntitySource + ?Sized,
    {
        self.filters
            .iter()
            .any(|filter| filter.passes(entity, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AttributeValue;
    use std::cell::Cell;
    use std::collections::HashSet;

    /// Lookup, der jeden Zugriff zählt.
    struct CountingSource {
        entities: HashMap<EntityId, Entity>,
        lookups: Cell<usize>,
    }

    impl CountingSource {
        fn new(entities: Vec<Entity>) -> Self {
            Self {
                entities: entities.into_iter().map(|e| (e.id, e)).collect(),
                lookups: Cell::new(0),
            }
        }
    }

    impl EntitySource for CountingSource {
        fn entity(&self, id: EntityId) -> Option<&Entity> {
            self.lookups.set(self.lookups.get() + 1);
            self.entities.get(&id)
        }
    }

    fn mark(value: &str) -> Attribute {
        Attribute::new("Marke", StorageKind::Text, value)
    }

    fn filter_for(attribute: &Attribute, scope: OwnerScope) -> AttributeFilter {
        AttributeFilter::capture(1, attribute, scope)
    }

    #[test]
    fn value_comparison_normalizes_whitespace_but_keeps_case() {
        let filter = filter_for(&mark("  Tür \n  EG-01 "), OwnerScope::Instance);

        let with_tabs = mark("Tür\t\tEG-01\r\n");
        assert!(filter.matches(&mark("Tür EG-01"), OwnerScope::Instance));
        assert!(filter.matches(&with_tabs, OwnerScope::Instance));
        assert!(!filter.matches(&mark("tür EG-01"), OwnerScope::Instance));
        assert!(!filter.matches(&mark("Tür EG-01"), OwnerScope::Type));
    }

    #[test]
    fn unreadable_values_never_match() {
        let mut unreadable = mark("");
        unreadable.value = AttributeValue::Unreadable;

        let filter = filter_for(&mark(""), OwnerScope::Instance);
        assert!(!filter.matches(&unreadable, OwnerScope::Instance));

        let captured = filter_for(&unreadable, OwnerScope::Instance);
        assert!(!captured.matches(&unreadable, OwnerScope::Instance));
        assert!(!captured.matches(&mark(""), OwnerScope::Instance));
    }

    #[test]
    fn empty_values_match_each_other() {
        let mut empty = mark("");
        empty.value = AttributeValue::Empty;

        let filter = filter_for(&empty, OwnerScope::Instance);
        assert!(filter.matches(&mark("   "), OwnerScope::Instance));
    }

    #[test]
    fn type_attribute_filter_matches_instances_of_that_type() {
        let door_type = Entity::new_type(10, "T30", Some("OST_Doors"))
            .with_attribute(Attribute::new("Feuerwiderstand", StorageKind::Text, "T30"));
        let door = Entity::new(1, "Tür", Some("OST_Doors")).with_type(10);
        let other = Entity::new(2, "Tür", Some("OST_Doors"));
        let source = CountingSource::new(vec![door_type.clone(), door.clone(), other.clone()]);

        let filter = filter_for(&door_type.attributes[0], OwnerScope::Type);

        assert!(filter.passes(&door, &source));
        assert!(filter.passes(&door_type, &source));
        assert!(!filter.passes(&other, &source));
    }

    #[test]
    fn instance_scoped_filter_does_not_match_type_attribute() {
        let door_type = Entity::new_type(10, "T30", Some("OST_Doors"))
            .with_attribute(mark("A"));
        let door = Entity::new(1, "Tür", Some("OST_Doors")).with_type(10);
        let source = CountingSource::new(vec![door_type, door.clone()]);

        let filter = filter_for(&mark("A"), OwnerScope::Instance);
        assert!(!filter.passes(&door, &source));
    }

    #[test]
    fn batch_evaluation_is_memoized_per_entity_id() {
        let wall_type = Entity::new_type(10, "Basiswand", Some("OST_Walls"))
            .with_attribute(mark("A"));
        let wall = Entity::new(1, "Wand", Some("OST_Walls")).with_type(10);
        let source = CountingSource::new(vec![wall_type, wall.clone()]);

        let filter = filter_for(&mark("A"), OwnerScope::Type);
        let input = vec![&wall, &wall, &wall];
        let passed = filter.passes_all(&input, &source);

        assert_eq!(passed.len(), 3);
        assert!(passed.iter().all(|e| e.id == 1));
        assert_eq!(source.lookups.get(), 1);
    }

    #[test]
    fn batch_preserves_input_order() {
        let a = Entity::new(3, "a", None).with_attribute(mark("A"));
        let b = Entity::new(1, "b", None).with_attribute(mark("B"));
        let c = Entity::new(2, "c", None).with_attribute(mark("A"));
        let source = CountingSource::new(vec![]);

        let filter = filter_for(&mark("A"), OwnerScope::Instance);
        let ids: Vec<EntityId> = filter
            .passes_all(&[&a, &b, &c, &a], &source)
            .into_iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, vec![3, 2, 3]);
    }

    #[test]
    fn chain_equals_intersection_of_individual_pass_sets() {
        let level = |v: &str| Attribute::new("Ebene", StorageKind::Text, v);
        let tagged = |id: EntityId, m: &str, l: &str| {
            Entity::new(id, "e", None)
                .with_attribute(mark(m))
                .with_attribute(level(l))
        };
        let entities: Vec<Entity> = vec![
            tagged(1, "A", "EG"),
            tagged(2, "A", "OG"),
            tagged(3, "B", "EG"),
            tagged(4, "A", "EG"),
            Entity::new(5, "e5", None),
        ];
        let source = CountingSource::new(vec![]);
        let refs: Vec<&Entity> = entities.iter().collect();

        let f1 = AttributeFilter::capture(1, &mark("A"), OwnerScope::Instance);
        let f2 = AttributeFilter::capture(2, &level("EG"), OwnerScope::Instance);
        let mut chain = AttributeFilterChain::new();
        chain.extend([f1.clone(), f2.clone()]);

        let chained: Vec<EntityId> = chain
            .apply(refs.clone(), &source)
            .iter()
            .map(|e| e.id)
            .collect();
        let nested: Vec<EntityId> = f2
            .passes_all(&f1.passes_all(&refs, &source), &source)
            .iter()
            .map(|e| e.id)
            .collect();
        let ids_of = |filter: &AttributeFilter| -> HashSet<EntityId> {
            filter
                .passes_all(&refs, &source)
                .iter()
                .map(|e| e.id)
                .collect()
        };
        let s1 = ids_of(&f1);
        let s2 = ids_of(&f2);
        let intersection: HashSet<EntityId> = s1.intersection(&s2).copied().collect();

        assert_eq!(chained, vec![1, 4]);
        assert_eq!(chained, nested);
        assert_eq!(chained.into_iter().collect::<HashSet<_>>(), intersection);
    }

    #[test]
    fn removing_rows_selects_successor_at_lowest_index() {
        let mut chain = AttributeFilterChain::new();
        let marked = mark("A");
        for id in 1..=4 {
            let filter = AttributeFilter::capture(id, &marked, OwnerScope::Instance);
            chain.extend([filter]);
        }

        assert_eq!(chain.remove(&[3, 2]), Some(4));
        assert_eq!(
            chain.filters().iter().map(|f| f.id()).collect::<Vec<_>>(),
            vec![1, 4]
        );
        assert_eq!(chain.remove(&[4]), None);
        assert_eq!(chain.remove(&[99]), None);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn sampling_collects_instance_then_type_attributes() {
        let wall_type = Entity::new_type(10, "Basiswand", Some("OST_Walls"))
            .with_attribute(Attribute::new("Breite", StorageKind::Number, "240 mm"));
        let wall = Entity::new(1, "Wand", Some("OST_Walls"))
            .with_type(10)
            .with_attribute(mark("A"));
        let source = CountingSource::new(vec![wall_type]);

        let sampled = sample_attributes(&wall, &source);
        let names: Vec<(&str, OwnerScope)> = sampled
            .iter()
            .map(|(a, s)| (a.name.as_str(), *s))
            .collect();

        assert_eq!(
            names,
            vec![
                ("Marke", OwnerScope::Instance),
                ("Breite", OwnerScope::Type),
            ]
        );
    }

    #[test]
    fn presentation_helpers_describe_the_filter() {
        let attribute = Attribute::new(
            "Kommentar",
            StorageKind::Text,
            "Eine sehr lange Bemerkung\nüber mehrere Zeilen",
        )
        .builtin(-1010106);
        let filter = AttributeFilter::capture(7, &attribute, OwnerScope::Instance);

        assert_eq!(filter.short_value(24), "Eine sehr lange Bemer...");
        assert_eq!(filter.short_value(24).chars().count(), 24);
        assert_eq!(filter.friendly_storage_kind(), "Text");
        let details = filter.technical_details();
        assert!(details.contains("Built-in id: -1010106"));

        let nameless = Attribute::new("", StorageKind::None, "x");
        let unnamed = AttributeFilter::capture(8, &nameless, OwnerScope::Type);
        assert_eq!(unnamed.label(), UNKNOWN_ATTRIBUTE_LABEL);
    }
}
