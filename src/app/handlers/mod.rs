//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod filters;
pub mod prefilter;
pub mod selection;
pub mod session;

use crate::app::error::SelectionError;
use crate::app::Session;

/// Leitet einen Pipeline-Fehler an die passende Stelle weiter.
///
/// Abbrüche werden verworfen, erwartbare Fehler landen als Rückmeldung beim
/// Benutzer, alles andere wird an den Aufrufer durchgereicht.
fn report(session: &mut Session, result: Result<(), SelectionError>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(SelectionError::UserCancelled) => {
            log::debug!("Auswahl abgebrochen");
            Ok(())
        }
        Err(error @ SelectionError::Unexpected(_)) => Err(error.into()),
        Err(error) => {
            log::warn!("{}", error);
            session.feedback.report_error(error.to_string());
            Ok(())
        }
    }
}
