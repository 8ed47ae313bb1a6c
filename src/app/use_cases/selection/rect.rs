//! Use-Case: Rechteck-Auswahl, beschränkt auf Elemente, die mindestens einen Filter passieren.

use indexmap::IndexSet;

use crate::app::error::SelectionError;
use crate::app::host::HostContext;
use crate::app::Session;
use crate::core::EntityId;

/// Aufforderung an den Benutzer.
pub const RECTANGLE_PROMPT: &str = "Elemente per Rechteck auswählen";

/// Ersetzt die Host-Selektion durch die im Rechteck gewählten Elemente.
pub fn pick_by_rectangle(
    session: &mut Session,
    host: &mut dyn HostContext,
) -> Result<usize, SelectionError> {
    let filters = &session.filters;
    let picked = host.pick_by_rectangle(RECTANGLE_PROMPT, &|entity, document| {
        filters.any_passes(entity, document)
    })?;

    let selection: IndexSet<EntityId> = picked.into_iter().collect();
    let count = selection.len();
    host.set_selection(selection);
    session.feedback.report_selection_count(count);
    Ok(count)
}
