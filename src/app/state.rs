//! Session-State: zentrale Datenhaltung pro Dokument.
//!
//! Die Session besitzt Vorfilter, Filterkette, Zeilenauswahl, Rückmeldungen
//! und Optionen. Sie wird nur vom privilegierten Thread verändert.

use indexmap::IndexSet;

use super::error::SelectionError;
use super::feedback::Feedback;
use super::host::HostContext;
use super::prefilter::{
    default_prefilters, CategoryFilter, GeneralFilter, LevelFilter, PrefilterKind,
    PrefilterOption, RoomFilter,
};
use super::use_cases::selection::{self, SelectionAction};
use super::CommandLog;
use crate::core::{
    sample_attributes, AttributeFilter, AttributeFilterChain, ContactDetector, Document,
    EntityId, FilterId,
};
use crate::shared::EngineOptions;

/// Zustand einer Selektions-Sitzung
pub struct Session {
    /// Die vier Vorfilter in fester Reihenfolge
    pub prefilters: Vec<PrefilterOption>,
    /// Parameter-Filterkette (UND in Deklarationsreihenfolge)
    pub filters: AttributeFilterChain,
    /// In der Filterliste markierte Zeilen
    pub selected_filters: Vec<FilterId>,
    /// Laufzeit-Optionen
    pub options: EngineOptions,
    /// Rückmeldungen für den Benutzer
    pub feedback: Feedback,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    next_filter_id: FilterId,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Erstellt eine leere Session mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Erstellt eine leere Session mit den gegebenen Optionen.
    pub fn with_options(options: EngineOptions) -> Self {
        let mut session = Self {
            prefilters: default_prefilters(),
            filters: AttributeFilterChain::new(),
            selected_filters: Vec::new(),
            options: EngineOptions::default(),
            feedback: Feedback::default(),
            command_log: CommandLog::new(),
            next_filter_id: 1,
        };
        session.set_options(options);
        session
    }

    /// Übernimmt neue Optionen und reicht sie an die betroffenen Teile weiter.
    pub fn set_options(&mut self, options: EngineOptions) {
        self.feedback.set_capacity(options.feedback_capacity);
        if let Some(room) = self.room_filter_mut() {
            room.set_failure_policy(options.room_failure_policy);
        }
        self.options = options;
    }

    /// Baut die Vorfilter-Kataloge für das (neue) aktive Dokument auf.
    pub fn init(&mut self, document: &dyn Document) {
        for option in &mut self.prefilters {
            option.filter.init(document);
        }
        log::info!(
            "Session initialisiert: {} Entitäten",
            document.entities().len()
        );
    }

    /// Kontaktdetektor mit den aktuellen Optionen.
    pub fn contact_detector(&self) -> ContactDetector {
        ContactDetector::new(self.options.contact_settings())
    }

    /// Vorfilter einer Art.
    pub fn prefilter(&self, kind: PrefilterKind) -> Option<&PrefilterOption> {
        self.prefilters
            .iter()
            .find(|option| option.filter.kind() == kind)
    }

    /// Veränderlicher Vorfilter einer Art.
    pub fn prefilter_mut(&mut self, kind: PrefilterKind) -> Option<&mut PrefilterOption> {
        self.prefilters
            .iter_mut()
            .find(|option| option.filter.kind() == kind)
    }

    /// Schaltet einen Vorfilter aktiv oder inaktiv.
    pub fn set_prefilter_active(&mut self, kind: PrefilterKind, active: bool) {
        if let Some(option) = self.prefilter_mut(kind) {
            option.is_active = active;
        }
    }

    /// Kategorie-Filter.
    pub fn category_filter(&self) -> Option<&CategoryFilter> {
        self.prefilters.iter().find_map(|option| match &option.filter {
            GeneralFilter::Category(filter) => Some(filter),
            _ => None,
        })
    }

    /// Veränderlicher Kategorie-Filter.
    pub fn category_filter_mut(&mut self) -> Option<&mut CategoryFilter> {
        self.prefilters
            .iter_mut()
            .find_map(|option| match &mut option.filter {
                GeneralFilter::Category(filter) => Some(filter),
                _ => None,
            })
    }

    /// Geschoss-Filter.
    pub fn level_filter(&self) -> Option<&LevelFilter> {
        self.prefilters.iter().find_map(|option| match &option.filter {
            GeneralFilter::Level(filter) => Some(filter),
            _ => None,
        })
    }

    /// Veränderlicher Geschoss-Filter.
    pub fn level_filter_mut(&mut self) -> Option<&mut LevelFilter> {
        self.prefilters
            .iter_mut()
            .find_map(|option| match &mut option.filter {
                GeneralFilter::Level(filter) => Some(filter),
                _ => None,
            })
    }

    /// Raum-Filter.
    pub fn room_filter(&self) -> Option<&RoomFilter> {
        self.prefilters.iter().find_map(|option| match &option.filter {
            GeneralFilter::Room(filter) => Some(filter),
            _ => None,
        })
    }

    /// Veränderlicher Raum-Filter.
    pub fn room_filter_mut(&mut self) -> Option<&mut RoomFilter> {
        self.prefilters
            .iter_mut()
            .find_map(|option| match &mut option.filter {
                GeneralFilter::Room(filter) => Some(filter),
                _ => None,
            })
    }

    /// Erfasst alle Parameter einer Entität (und ihres Typs) als Filter.
    ///
    /// Gibt die IDs der angehängten Filter zurück; unbekannte IDs ergeben keine Filter.
    pub fn sample_attributes_from(
        &mut self,
        document: &dyn Document,
        entity_id: EntityId,
    ) -> Vec<FilterId> {
        let Some(entity) = document.entity(entity_id) else {
            log::warn!("Stichprobe: Element {} nicht im Dokument", entity_id);
            return Vec::new();
        };

        let captured: Vec<AttributeFilter> = sample_attributes(entity, document)
            .into_iter()
            .map(|(attribute, scope)| {
                let id = self.next_filter_id;
                self.next_filter_id += 1;
                AttributeFilter::capture(id, attribute, scope)
            })
            .collect();

        let ids = captured.iter().map(AttributeFilter::id).collect();
        self.filters.extend(captured);
        ids
    }

    /// Zeilen der Filterliste: ID, Beschriftung und gekürzter Wert.
    pub fn filter_rows(&self) -> Vec<(FilterId, String, String)> {
        let max_chars = self.options.short_value_max_chars;
        self.filters
            .filters()
            .iter()
            .map(|filter| {
                (
                    filter.id(),
                    format!("{} ({})", filter.label(), filter.owner_scope().as_str()),
                    filter.short_value(max_chars),
                )
            })
            .collect()
    }

    /// Markiert Zeilen der Filterliste (unbekannte IDs werden ignoriert).
    pub fn select_filters(&mut self, ids: &[FilterId]) {
        self.selected_filters = ids
            .iter()
            .copied()
            .filter(|id| self.filters.get(*id).is_some())
            .collect();
    }

    /// Entfernt Filter; markiert danach den Nachfolger an der kleinsten entfernten Position.
    pub fn remove_filters(&mut self, ids: &[FilterId]) {
        let successor = self.filters.remove(ids);
        self.selected_filters = successor.into_iter().collect();
    }

    /// Entfernt alle markierten Filter.
    pub fn remove_selected_filters(&mut self) {
        let ids = std::mem::take(&mut self.selected_filters);
        self.remove_filters(&ids);
    }

    /// Entfernt alle Filter.
    pub fn remove_all_filters(&mut self) {
        self.filters.clear();
        self.selected_filters.clear();
    }

    /// Löst die Ziel-IDs aus Vorfiltern und Filterkette auf.
    pub fn resolve_target_ids(
        &self,
        document: &dyn Document,
    ) -> Result<IndexSet<EntityId>, SelectionError> {
        selection::resolve_target_ids(
            document,
            &self.prefilters,
            &self.filters,
            &self.contact_detector(),
        )
    }

    /// Wendet eine Selektionsaktion auf die Host-Selektion an.
    pub fn apply_action(
        &mut self,
        host: &mut dyn HostContext,
        action: SelectionAction,
    ) -> Result<usize, SelectionError> {
        selection::apply_to_host(self, host, action)
    }
}
