//! Use-Case: Räume für den Raumfilter wählen.

use crate::app::error::SelectionError;
use crate::app::host::HostContext;
use crate::app::prefilter::RoomFilter;
use crate::app::Session;

/// Aufforderung an den Benutzer.
pub const ROOMS_PROMPT: &str = "Räume auswählen";

/// Lässt Räume wählen (aktuelle Räume vorausgewählt) und ersetzt die Liste.
///
/// Gibt die Anzahl gewählter Räume zurück.
pub fn select_rooms(
    session: &mut Session,
    host: &mut dyn HostContext,
) -> Result<usize, SelectionError> {
    let allowed = RoomFilter::available_rooms(host.document());
    let preselected = session
        .room_filter()
        .map(RoomFilter::room_ids)
        .unwrap_or_default();

    let picked = host.pick_objects(ROOMS_PROMPT, &allowed, &preselected)?;

    let document = host.document();
    let Some(filter) = session.room_filter_mut() else {
        return Err(SelectionError::Unexpected("Raumfilter nicht vorhanden".to_string()));
    };
    filter.set_rooms(document, &picked);

    let count = filter.rooms().len();
    log::info!("{} Räume gewählt", count);
    Ok(count)
}

/// Entfernt alle gewählten Räume.
pub fn clear_rooms(session: &mut Session) {
    if let Some(filter) = session.room_filter_mut() {
        filter.clear_rooms();
    }
}
