//! Handler für Host-interaktive Selektions-Operationen.

use super::report;
use crate::app::host::HostContext;
use crate::app::use_cases;
use crate::app::use_cases::selection::SelectionAction;
use crate::app::Session;

/// Wendet die gefilterte Zielmenge auf die Host-Selektion an.
pub fn apply(
    session: &mut Session,
    host: &mut dyn HostContext,
    action: SelectionAction,
) -> anyhow::Result<()> {
    let result = session.apply_action(host, action).map(|_| ());
    report(session, result)
}

/// Startet die Rechteck-Auswahl mit der Filterkette als Prädikat.
pub fn pick_by_rectangle(session: &mut Session, host: &mut dyn HostContext) -> anyhow::Result<()> {
    let result = use_cases::selection::pick_by_rectangle(session, host).map(|_| ());
    report(session, result)
}

/// Nimmt eine Stichprobe und hängt deren Parameter an die Filterkette.
pub fn take_sample(session: &mut Session, host: &mut dyn HostContext) -> anyhow::Result<()> {
    let result = use_cases::sampling::take_sample(session, host).map(|_| ());
    report(session, result)
}

/// Lässt Räume wählen.
pub fn select_rooms(session: &mut Session, host: &mut dyn HostContext) -> anyhow::Result<()> {
    let result = use_cases::rooms::select_rooms(session, host).map(|_| ());
    report(session, result)
}

/// Leert die Raumliste.
pub fn clear_rooms(session: &mut Session) {
    use_cases::rooms::clear_rooms(session);
    log::debug!("Raumliste geleert");
}
