//! Use-Case: Ziel-IDs aus Vorfiltern und Parameter-Filterkette auflösen.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::app::error::SelectionError;
use crate::app::prefilter::PrefilterOption;
use crate::core::{AttributeFilterChain, ContactDetector, Document, Entity, EntityId};

/// Alle Nicht-Typ-Entitäten, die jeden aktiven Vorfilter passieren (Dokument-Reihenfolge).
///
/// Ohne aktive Vorfilter bleibt das gesamte Universum erhalten.
pub fn prefiltered_entities<'a>(
    document: &'a dyn Document,
    prefilters: &[PrefilterOption],
    detector: &ContactDetector,
) -> Result<Vec<&'a Entity>, SelectionError> {
    let mut allowed: Option<HashSet<EntityId>> = None;

    for option in prefilters.iter().filter(|option| option.is_active) {
        let ids = option.filter.filtered_elements(document, detector)?;
        log::debug!(
            "Vorfilter '{}': {} Elemente",
            option.filter.title(),
            ids.len()
        );
        allowed = Some(match allowed {
            None => ids,
            Some(previous) => previous.intersection(&ids).copied().collect(),
        });
    }

    let universe = document.non_type_entities().into_iter();
    Ok(match allowed {
        Some(ids) => universe.filter(|entity| ids.contains(&entity.id)).collect(),
        None => universe.collect(),
    })
}

/// Vorfilter, danach die Filterkette in Deklarationsreihenfolge (UND).
pub fn resolve_target_ids(
    document: &dyn Document,
    prefilters: &[PrefilterOption],
    filters: &AttributeFilterChain,
    detector: &ContactDetector,
) -> Result<IndexSet<EntityId>, SelectionError> {
    let universe = prefiltered_entities(document, prefilters, detector)?;
    let universe_len = universe.len();

    let targets: IndexSet<EntityId> = filters
        .apply(universe, document)
        .into_iter()
        .map(|entity| entity.id)
        .collect();

    log::info!(
        "Auflösung: {} nach Vorfiltern, {} nach {} Parameter-Filtern",
        universe_len,
        targets.len(),
        filters.len()
    );
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::prefilter::{default_prefilters, GeneralFilter, PrefilterKind};
    use crate::core::{Attribute, AttributeFilter, Level, MemoryDocument, OwnerScope, StorageKind};

    /// e1: Kategorie A / L1, e2: A / L2, e3: B / L1.
    fn document() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.add_level(level(101, "L1", 0.0));
        doc.add_level(level(102, "L2", 3.0));
        doc.add_entity(Entity::new(1, "e1", Some("A")).with_attribute(mark("X")));
        doc.add_entity(Entity::new(2, "e2", Some("A")).with_attribute(mark("X")));
        doc.add_entity(Entity::new(3, "e3", Some("B")).with_attribute(mark("Y")));
        doc.add_entity(Entity::new_type(4, "Typ A", Some("A")));
        doc.assign_level(1, 101);
        doc.assign_level(2, 102);
        doc.assign_level(3, 101);
        doc
    }

    fn level(id: EntityId, name: &str, elevation: f64) -> Level {
        Level {
            id,
            name: name.to_string(),
            elevation,
        }
    }

    fn mark(value: &str) -> Attribute {
        Attribute::new("Marke", StorageKind::Text, value)
    }

    fn prefilters(
        doc: &MemoryDocument,
        categories: &[&str],
        levels: &[EntityId],
    ) -> Vec<PrefilterOption> {
        let mut prefilters = default_prefilters();
        for option in &mut prefilters {
            option.filter.init(doc);
            match &mut option.filter {
                GeneralFilter::Category(filter) => {
                    for key in categories {
                        filter.set_checked(key, true);
                    }
                }
                GeneralFilter::Level(filter) => {
                    for level in levels {
                        filter.set_checked(*level, true);
                    }
                }
                GeneralFilter::ActiveView(_) | GeneralFilter::Room(_) => {}
            }
        }
        prefilters
    }

    fn activate(prefilters: &mut [PrefilterOption], kind: PrefilterKind, active: bool) {
        if let Some(option) = prefilters.iter_mut().find(|o| o.filter.kind() == kind) {
            option.is_active = active;
        }
    }

    #[test]
    fn no_active_prefilter_keeps_non_type_universe() {
        let doc = document();
        let ids = resolve_target_ids(
            &doc,
            &default_prefilters(),
            &AttributeFilterChain::new(),
            &ContactDetector::default(),
        )
        .expect("kein Fehler");

        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn active_prefilters_are_intersected() {
        let doc = document();
        let mut prefilters = prefilters(&doc, &["A"], &[101]);
        activate(&mut prefilters, PrefilterKind::Category, true);
        activate(&mut prefilters, PrefilterKind::Level, true);
        let detector = ContactDetector::default();
        let chain = AttributeFilterChain::new();

        let ids = resolve_target_ids(&doc, &prefilters, &chain, &detector).expect("kein Fehler");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1]);

        activate(&mut prefilters, PrefilterKind::Level, false);
        let ids = resolve_target_ids(&doc, &prefilters, &chain, &detector).expect("kein Fehler");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn active_prefilter_with_nothing_checked_empties_universe() {
        let doc = document();
        let mut prefilters = prefilters(&doc, &[], &[]);
        activate(&mut prefilters, PrefilterKind::Category, true);

        let ids = resolve_target_ids(
            &doc,
            &prefilters,
            &AttributeFilterChain::new(),
            &ContactDetector::default(),
        )
        .expect("kein Fehler");
        assert!(ids.is_empty());
    }

    #[test]
    fn attribute_chain_narrows_prefiltered_universe() {
        let doc = document();
        let mut prefilters = prefilters(&doc, &[], &[101]);
        activate(&mut prefilters, PrefilterKind::Level, true);
        let mut chain = AttributeFilterChain::new();
        let filter = AttributeFilter::capture(1, &mark("X"), OwnerScope::Instance);
        chain.extend([filter]);

        let ids = resolve_target_ids(&doc, &prefilters, &chain, &ContactDetector::default())
            .expect("kein Fehler");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn failing_prefilter_voids_resolution() {
        let doc = document();
        let mut prefilters = prefilters(&doc, &[], &[]);
        activate(&mut prefilters, PrefilterKind::ActiveView, true);

        let result = resolve_target_ids(
            &doc,
            &prefilters,
            &AttributeFilterChain::new(),
            &ContactDetector::default(),
        );
        assert_eq!(result, Err(SelectionError::NoActiveView));
    }
}
