//! Übergabe von Anforderungen an den privilegierten Thread.
//!
//! Der interaktive Thread ruft nur `HandlerWrapper::raise` auf. Ausgeführt
//! wird ausschließlich in `EventMarshal::pump` auf dem privilegierten Thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use super::host::HostContext;
use super::use_cases::selection::SelectionAction;
use super::{AppController, AppIntent, Session};
use crate::shared::DeliveryMode;

/// Kontext einer Handler-Ausführung (nur für die Dauer eines Pumpvorgangs geliehen).
pub struct HandlerContext<'a> {
    pub session: &'a mut Session,
    pub host: &'a mut dyn HostContext,
    pub controller: &'a mut AppController,
}

/// Auf dem privilegierten Thread ausführbarer Handler.
pub trait ExternalHandler: Send {
    /// Führt den Handler aus.
    fn execute(&mut self, context: &mut HandlerContext<'_>) -> anyhow::Result<()>;

    /// Anzeigename für Logs und Fehlermeldungen.
    fn name(&self) -> &str;
}

/// Handler, der einen festen Intent über den Controller ausführt.
#[derive(Debug, Clone)]
pub struct IntentHandler {
    name: String,
    intent: AppIntent,
}

impl IntentHandler {
    /// Erstellt einen Handler für einen beliebigen Intent.
    pub fn new(name: impl Into<String>, intent: AppIntent) -> Self {
        Self {
            name: name.into(),
            intent,
        }
    }

    /// Stichprobe nehmen.
    pub fn take_sample() -> Self {
        Self::new("Stichprobe", AppIntent::TakeSampleRequested)
    }

    /// Gefilterte Elemente anwenden, hinzufügen oder entfernen.
    pub fn selection(action: SelectionAction) -> Self {
        let name = match action {
            SelectionAction::Apply => "Auswahl anwenden",
            SelectionAction::Add => "Zur Auswahl hinzufügen",
            SelectionAction::Remove => "Aus Auswahl entfernen",
        };
        Self::new(name, AppIntent::SelectionActionRequested { action })
    }

    /// Rechteck-Auswahl.
    pub fn pick_by_rectangle() -> Self {
        Self::new("Rechteck-Auswahl", AppIntent::PickByRectangleRequested)
    }

    /// Räume wählen.
    pub fn select_rooms() -> Self {
        Self::new("Räume wählen", AppIntent::SelectRoomsRequested)
    }
}

impl ExternalHandler for IntentHandler {
    fn execute(&mut self, context: &mut HandlerContext<'_>) -> anyhow::Result<()> {
        context
            .controller
            .handle_intent(context.session, context.host, self.intent.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct Slot {
    handler: Box<dyn ExternalHandler>,
    pending: Arc<AtomicBool>,
    disposed: Arc<AtomicBool>,
}

/// Auslöser für einen registrierten Handler (`Send + Sync`).
#[derive(Clone)]
pub struct HandlerWrapper {
    index: usize,
    mode: DeliveryMode,
    pending: Arc<AtomicBool>,
    disposed: Arc<AtomicBool>,
    sender: Sender<usize>,
}

impl HandlerWrapper {
    /// Plant eine Ausführung ein, ohne sie auszuführen.
    ///
    /// Gibt `false` zurück, wenn nichts neu eingeplant wurde: der Handler ist
    /// verworfen, im Modus `Coalesce` bereits ausstehend oder der Marshal existiert nicht mehr.
    pub fn raise(&self) -> bool {
        if self.disposed.load(Ordering::Acquire) {
            return false;
        }
        if self.mode == DeliveryMode::Coalesce && self.pending.swap(true, Ordering::AcqRel) {
            return false;
        }
        if self.sender.send(self.index).is_err() {
            self.pending.store(false, Ordering::Release);
            return false;
        }
        true
    }

    /// Verwirft den Handler; ausstehende und künftige Auslösungen laufen ins Leere.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    /// Gibt `true` zurück, wenn der Handler verworfen wurde.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

/// Register der Handler und Warteschlange der Auslösungen.
pub struct EventMarshal {
    mode: DeliveryMode,
    sender: Sender<usize>,
    receiver: Receiver<usize>,
    slots: Vec<Slot>,
    controller: AppController,
}

impl EventMarshal {
    /// Erstellt einen Marshal mit gegebenem Zustellmodus.
    pub fn new(mode: DeliveryMode) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            mode,
            sender,
            receiver,
            slots: Vec::new(),
            controller: AppController::new(),
        }
    }

    /// Zustellmodus.
    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Registriert einen Handler und liefert seinen Auslöser.
    pub fn create(&mut self, handler: impl ExternalHandler + 'static) -> HandlerWrapper {
        let pending = Arc::new(AtomicBool::new(false));
        let disposed = Arc::new(AtomicBool::new(false));
        let index = self.slots.len();

        log::debug!("Handler registriert: {}", handler.name());
        self.slots.push(Slot {
            handler: Box::new(handler),
            pending: Arc::clone(&pending),
            disposed: Arc::clone(&disposed),
        });

        HandlerWrapper {
            index,
            mode: self.mode,
            pending,
            disposed,
            sender: self.sender.clone(),
        }
    }

    /// Führt alle ausstehenden Auslösungen aus (nur auf dem privilegierten Thread).
    ///
    /// Fehler eines Handlers werden geloggt und als Rückmeldung eingereiht.
    /// Gibt die Anzahl ausgeführter Handler zurück.
    pub fn pump(&mut self, session: &mut Session, host: &mut dyn HostContext) -> usize {
        let mut executed = 0;

        while let Ok(index) = self.receiver.try_recv() {
            let Some(slot) = self.slots.get_mut(index) else {
                continue;
            };
            // Vor der Ausführung freigeben, damit Auslösungen währenddessen erneut greifen
            slot.pending.store(false, Ordering::Release);
            if slot.disposed.load(Ordering::Acquire) {
                continue;
            }

            let mut context = HandlerContext {
                session: &mut *session,
                host: &mut *host,
                controller: &mut self.controller,
            };
            if let Err(error) = slot.handler.execute(&mut context) {
                log::error!(
                    "Handler '{}' fehlgeschlagen: {:#}",
                    slot.handler.name(),
                    error
                );
                session.feedback.report_error(error.to_string());
            }
            executed += 1;
        }

        executed
    }
}
