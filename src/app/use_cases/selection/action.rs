//! Use-Case: Selektionsaktionen gegen die Host-Selektion.

use indexmap::IndexSet;

use crate::app::error::SelectionError;
use crate::app::host::HostContext;
use crate::app::Session;
use crate::core::EntityId;

/// Verknüpfung der Ziel-IDs mit der aktuellen Selektion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    /// Neue Selektion = Ziel-IDs
    Apply,
    /// Aktuelle Selektion ∪ Ziel-IDs
    Add,
    /// Aktuelle Selektion − Ziel-IDs
    Remove,
}

/// Berechnet die neue Selektion (Reihenfolge: aktuelle zuerst, dann neue Ziele).
pub fn apply_action(
    action: SelectionAction,
    targets: IndexSet<EntityId>,
    current: IndexSet<EntityId>,
) -> IndexSet<EntityId> {
    match action {
        SelectionAction::Apply => targets,
        SelectionAction::Add => {
            let mut selection = current;
            selection.extend(targets);
            selection
        }
        SelectionAction::Remove => current
            .into_iter()
            .filter(|id| !targets.contains(id))
            .collect(),
    }
}

/// Löst die Ziel-IDs auf, setzt die Host-Selektion und meldet die Anzahl.
///
/// Bei einem Fehler bleibt die Host-Selektion unverändert.
pub fn apply_to_host(
    session: &mut Session,
    host: &mut dyn HostContext,
    action: SelectionAction,
) -> Result<usize, SelectionError> {
    let targets = session.resolve_target_ids(host.document())?;
    let selection = apply_action(action, targets, host.current_selection());
    let count = selection.len();

    host.set_selection(selection);
    session.feedback.report_selection_count(count);
    Ok(count)
}
