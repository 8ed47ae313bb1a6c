//! Handler für die Parameter-Filterliste.

use crate::app::Session;
use crate::core::FilterId;

/// Markiert Zeilen der Filterliste.
pub fn select_rows(session: &mut Session, ids: &[FilterId]) {
    session.select_filters(ids);
}

/// Entfernt Filter nach ID.
pub fn remove(session: &mut Session, ids: &[FilterId]) {
    session.remove_filters(ids);
    log::info!("{} Filter verbleiben", session.filters.len());
}

/// Entfernt alle Filter.
pub fn remove_all(session: &mut Session) {
    session.remove_all_filters();
    log::info!("Alle Filter entfernt");
}
