//! Fehlertypen der Selektions-Pipeline und der Host-Interaktion.

use crate::core::{EntityId, GeometryError};

/// Fehler beim Auflösen oder Anwenden einer Selektion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    /// Interaktive Auswahl vom Benutzer abgebrochen (wird still verworfen)
    #[error("Auswahl abgebrochen")]
    UserCancelled,
    /// Vorfilter "aktive Ansicht" ohne räumliche Ansicht
    #[error("Keine aktive Ansicht, bitte eine Ansicht öffnen")]
    NoActiveView,
    /// Geometrie eines gewählten Raums nicht lesbar
    #[error("Kontaktberechnung für Raum <{room}> nicht möglich: {source}")]
    ContactComputation {
        room: EntityId,
        #[source]
        source: GeometryError,
    },
    /// Alles andere
    #[error("Unerwarteter Fehler: {0}")]
    Unexpected(String),
}

impl SelectionError {
    /// Gibt `true` zurück, wenn der Fehler dem Benutzer angezeigt werden soll.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, SelectionError::UserCancelled)
    }
}

/// Fehler einer interaktiven Auswahl im Host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickError {
    /// Benutzer hat die Auswahl abgebrochen
    #[error("Auswahl abgebrochen")]
    Cancelled,
    /// Host konnte die Auswahl nicht durchführen
    #[error("Auswahl fehlgeschlagen: {0}")]
    Failed(String),
}

impl From<PickError> for SelectionError {
    fn from(error: PickError) -> Self {
        match error {
            PickError::Cancelled => SelectionError::UserCancelled,
            PickError::Failed(message) => SelectionError::Unexpected(message),
        }
    }
}
