//! Handler für Session-Lebenszyklus und Optionen.

use crate::app::host::HostContext;
use crate::app::Session;
use crate::shared::EngineOptions;

/// Baut die Vorfilter-Kataloge für das aktive Dokument neu auf.
pub fn init(session: &mut Session, host: &dyn HostContext) {
    session.init(host.document());
}

/// Übernimmt neue Optionen.
pub fn apply_options(session: &mut Session, options: EngineOptions) {
    session.set_options(options);
    log::info!("Optionen übernommen");
}

/// Setzt Optionen auf Standardwerte zurück.
pub fn reset_options(session: &mut Session) {
    session.set_options(EngineOptions::default());
    log::info!("Optionen zurückgesetzt");
}

/// Persistiert die aktuellen Optionen in der Konfigurationsdatei.
pub fn save_options(session: &Session) -> anyhow::Result<()> {
    let path = EngineOptions::config_path();
    session.options.save_to_file(&path)
}
