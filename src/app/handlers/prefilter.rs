//! Handler für Vorfilter-Kataloge.

use crate::app::prefilter::{PrefilterKind, RoomMethod};
use crate::app::Session;
use crate::core::EntityId;

/// Aktiviert oder deaktiviert einen Vorfilter.
pub fn set_active(session: &mut Session, kind: PrefilterKind, active: bool) {
    session.set_prefilter_active(kind, active);
    log::debug!("Vorfilter {:?} aktiv: {}", kind, active);
}

/// Schaltet eine Kategorie um.
pub fn toggle_category(session: &mut Session, key: &str) {
    if let Some(filter) = session.category_filter_mut() {
        if !filter.toggle(key) {
            log::debug!("Kategorie {} nicht im Katalog", key);
        }
    }
}

/// Setzt den Haken einer Kategorie.
pub fn set_category_checked(session: &mut Session, key: &str, checked: bool) {
    if let Some(filter) = session.category_filter_mut() {
        filter.set_checked(key, checked);
    }
}

/// Setzt den Suchtext des Kategorie-Katalogs.
pub fn set_category_search(session: &mut Session, text: &str) {
    if let Some(filter) = session.category_filter_mut() {
        filter.set_search_text(text);
    }
}

/// Hakt alle sichtbaren Kategorien an.
pub fn select_all_visible_categories(session: &mut Session) {
    if let Some(filter) = session.category_filter_mut() {
        filter.select_all_visible();
    }
}

/// Hakt alle Kategorien ab.
pub fn deselect_all_categories(session: &mut Session) {
    if let Some(filter) = session.category_filter_mut() {
        filter.deselect_all();
    }
}

/// Invertiert die sichtbaren Kategorien.
pub fn invert_visible_categories(session: &mut Session) {
    if let Some(filter) = session.category_filter_mut() {
        filter.invert_visible();
    }
}

/// Schaltet ein Geschoss um.
pub fn toggle_level(session: &mut Session, level: EntityId) {
    if let Some(filter) = session.level_filter_mut() {
        if !filter.toggle(level) {
            log::debug!("Geschoss {} nicht im Katalog", level);
        }
    }
}

/// Schaltet eine Raum-Methode.
pub fn set_room_method(session: &mut Session, method: RoomMethod, enabled: bool) {
    if let Some(filter) = session.room_filter_mut() {
        filter.set_method(method, enabled);
    }
}
