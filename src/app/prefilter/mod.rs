//! Strukturelle Vorfilter (Kategorie, aktive Ansicht, Geschoss, Raum).
//!
//! Geschlossene Variante über die vier Filterarten:
//! - `category`: Katalog der Kategorien mit Suche
//! - `active_view`: Sichtbarkeit in der aktiven Ansicht
//! - `level`: Geschosse nach Höhenlage
//! - `room`: Raumbeziehungen und Raum-Kontakt

mod active_view;
mod category;
mod level;
mod room;

use std::collections::HashSet;

pub use active_view::ActiveViewFilter;
pub use category::{CategoryEntry, CategoryFilter};
pub use level::{LevelEntry, LevelFilter};
pub use room::{RoomEntry, RoomFilter, RoomMethod, RoomMethods};

use super::error::SelectionError;
use crate::core::{ContactDetector, Document, EntityId};

/// Art eines Vorfilters (für Intents und Lookups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefilterKind {
    Category,
    ActiveView,
    Level,
    Room,
}

impl PrefilterKind {
    /// Alle Arten in Anzeigereihenfolge.
    pub const ALL: [PrefilterKind; 4] = [
        PrefilterKind::Category,
        PrefilterKind::ActiveView,
        PrefilterKind::Level,
        PrefilterKind::Room,
    ];
}

/// Ein Vorfilter mit eigenem Zustand.
#[derive(Debug, Clone)]
pub enum GeneralFilter {
    Category(CategoryFilter),
    ActiveView(ActiveViewFilter),
    Level(LevelFilter),
    Room(RoomFilter),
}

impl GeneralFilter {
    /// Leerer Filter der gegebenen Art.
    pub fn new(kind: PrefilterKind) -> Self {
        match kind {
            PrefilterKind::Category => GeneralFilter::Category(CategoryFilter::new()),
            PrefilterKind::ActiveView => GeneralFilter::ActiveView(ActiveViewFilter),
            PrefilterKind::Level => GeneralFilter::Level(LevelFilter::new()),
            PrefilterKind::Room => GeneralFilter::Room(RoomFilter::new()),
        }
    }

    /// Art des Filters.
    pub fn kind(&self) -> PrefilterKind {
        match self {
            GeneralFilter::Category(_) => PrefilterKind::Category,
            GeneralFilter::ActiveView(_) => PrefilterKind::ActiveView,
            GeneralFilter::Level(_) => PrefilterKind::Level,
            GeneralFilter::Room(_) => PrefilterKind::Room,
        }
    }

    /// Anzeigetitel.
    pub fn title(&self) -> &'static str {
        match self {
            GeneralFilter::Category(_) => "Nach Kategorie",
            GeneralFilter::ActiveView(_) => "Nur in der aktiven Ansicht sichtbar",
            GeneralFilter::Level(_) => "Auf gewählten Geschossen",
            GeneralFilter::Room(_) => "Räume",
        }
    }

    /// Baut den Katalog für ein (neues) Dokument auf.
    pub fn init(&mut self, document: &dyn Document) {
        match self {
            GeneralFilter::Category(filter) => filter.init(document),
            GeneralFilter::ActiveView(_) => {}
            GeneralFilter::Level(filter) => filter.init(document),
            GeneralFilter::Room(filter) => filter.init(document),
        }
    }

    /// Ergebnis-Menge des Filters.
    pub fn filtered_elements(
        &self,
        document: &dyn Document,
        detector: &ContactDetector,
    ) -> Result<HashSet<EntityId>, SelectionError> {
        match self {
            GeneralFilter::Category(filter) => Ok(filter.filtered_elements(document)),
            GeneralFilter::ActiveView(filter) => filter.filtered_elements(document),
            GeneralFilter::Level(filter) => Ok(filter.filtered_elements(document)),
            GeneralFilter::Room(filter) => filter.filtered_elements(document, detector),
        }
    }
}

/// Vorfilter mit Aktiv-Schalter; inaktive Filter werden übersprungen.
#[derive(Debug, Clone)]
pub struct PrefilterOption {
    /// Der Filter
    pub filter: GeneralFilter,
    /// Nimmt an der Schnittmenge teil
    pub is_active: bool,
}

impl PrefilterOption {
    /// Inaktiver Vorfilter der gegebenen Art.
    pub fn new(kind: PrefilterKind) -> Self {
        Self {
            filter: GeneralFilter::new(kind),
            is_active: false,
        }
    }
}

/// Die vier Vorfilter in fester Reihenfolge, alle inaktiv.
pub fn default_prefilters() -> Vec<PrefilterOption> {
    PrefilterKind::ALL
        .into_iter()
        .map(PrefilterOption::new)
        .collect()
}
