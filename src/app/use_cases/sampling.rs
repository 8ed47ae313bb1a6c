//! Use-Case: Stichprobe nehmen.
//!
//! Der Benutzer wählt ein Element; alle seine Parameter und die seines Typs
//! werden als Filter an die Kette gehängt.

use crate::app::error::SelectionError;
use crate::app::host::HostContext;
use crate::app::Session;
use crate::core::FilterId;

/// Aufforderung an den Benutzer.
pub const SAMPLE_PROMPT: &str = "Stichprobe auswählen";

/// Lässt ein Element wählen und erfasst seine Parameter als Filter.
///
/// Gibt die IDs der neuen Filter zurück.
pub fn take_sample(
    session: &mut Session,
    host: &mut dyn HostContext,
) -> Result<Vec<FilterId>, SelectionError> {
    let entity_id = host.pick_object(SAMPLE_PROMPT)?;
    let added = session.sample_attributes_from(host.document(), entity_id);

    log::info!(
        "Stichprobe von Element {}: {} Filter hinzugefügt",
        entity_id,
        added.len()
    );
    Ok(added)
}
