//! Host-Kontext: Dokument, aktuelle Selektion und interaktive Auswahl.
//!
//! Der Kern führt selbst keine interaktive Auswahl durch, sondern bittet den
//! Host darum. `MemoryHost` beantwortet diese Anfragen aus einem Skript.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexSet;

use super::error::PickError;
use crate::core::{Document, Entity, EntityId, EntitySource, MemoryDocument};

/// Prädikat für die Rechteck-Auswahl; bekommt das Dokument mitgeliefert.
pub type PickPredicate<'a> = &'a dyn Fn(&Entity, &dyn Document) -> bool;

/// Zugriff auf den Host während eines Handler-Aufrufs.
pub trait HostContext {
    /// Aktives Dokument (stabil für die Dauer eines Aufrufs).
    fn document(&self) -> &dyn Document;

    /// Aktuelle Selektion des Hosts.
    fn current_selection(&self) -> IndexSet<EntityId>;

    /// Ersetzt die Selektion des Hosts.
    fn set_selection(&mut self, ids: IndexSet<EntityId>);

    /// Lässt den Benutzer ein einzelnes Element wählen.
    fn pick_object(&mut self, prompt: &str) -> Result<EntityId, PickError>;

    /// Lässt den Benutzer mehrere Elemente aus `allowed` wählen.
    fn pick_objects(
        &mut self,
        prompt: &str,
        allowed: &HashSet<EntityId>,
        preselected: &[EntityId],
    ) -> Result<Vec<EntityId>, PickError>;

    /// Rechteck-Auswahl, beschränkt auf Elemente, die `allow` zulässt.
    fn pick_by_rectangle(
        &mut self,
        prompt: &str,
        allow: PickPredicate<'_>,
    ) -> Result<Vec<EntityId>, PickError>;
}

/// Vorbereitete Antwort auf eine interaktive Auswahl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedPick {
    /// Ergebnis von `pick_object`
    Object(EntityId),
    /// Ergebnis von `pick_objects` oder `pick_by_rectangle`
    Objects(Vec<EntityId>),
    /// Benutzer bricht ab
    Cancel,
    /// Host meldet einen Fehler
    Fail(String),
}

/// Host im Speicher mit skriptbarer Auswahl (Binary und Tests).
#[derive(Debug, Default)]
pub struct MemoryHost {
    document: MemoryDocument,
    selection: IndexSet<EntityId>,
    picks: VecDeque<ScriptedPick>,
    prompts: Vec<String>,
}

impl MemoryHost {
    /// Erstellt einen Host für ein Dokument mit leerer Selektion.
    pub fn new(document: MemoryDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Direkter Zugriff auf das Dokument.
    pub fn memory_document(&self) -> &MemoryDocument {
        &self.document
    }

    /// Veränderlicher Zugriff auf das Dokument (zwischen Handler-Aufrufen).
    pub fn memory_document_mut(&mut self) -> &mut MemoryDocument {
        &mut self.document
    }

    /// Reiht eine Antwort für die nächste interaktive Auswahl ein.
    pub fn script_pick(&mut self, pick: ScriptedPick) {
        self.picks.push_back(pick);
    }

    /// Alle bisher gestellten Auswahl-Aufforderungen.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    fn next_pick(&mut self, prompt: &str) -> Result<ScriptedPick, PickError> {
        self.prompts.push(prompt.to_string());
        match self.picks.pop_front() {
            Some(ScriptedPick::Cancel) => Err(PickError::Cancelled),
            Some(ScriptedPick::Fail(message)) => Err(PickError::Failed(message)),
            Some(pick) => Ok(pick),
            None => Err(PickError::Failed("Keine Auswahl vorbereitet".to_string())),
        }
    }
}

impl HostContext for MemoryHost {
    fn document(&self) -> &dyn Document {
        &self.document
    }

    fn current_selection(&self) -> IndexSet<EntityId> {
        self.selection.clone()
    }

    fn set_selection(&mut self, ids: IndexSet<EntityId>) {
        self.selection = ids;
    }

    fn pick_object(&mut self, prompt: &str) -> Result<EntityId, PickError> {
        match self.next_pick(prompt)? {
            ScriptedPick::Object(id) => Ok(id),
            ScriptedPick::Objects(ids) => ids
                .first()
                .copied()
                .ok_or_else(|| PickError::Failed("Leere Auswahl".to_string())),
            ScriptedPick::Cancel | ScriptedPick::Fail(_) => Err(PickError::Cancelled),
        }
    }

    fn pick_objects(
        &mut self,
        prompt: &str,
        allowed: &HashSet<EntityId>,
        _preselected: &[EntityId],
    ) -> Result<Vec<EntityId>, PickError> {
        let ids = match self.next_pick(prompt)? {
            ScriptedPick::Object(id) => vec![id],
            ScriptedPick::Objects(ids) => ids,
            ScriptedPick::Cancel | ScriptedPick::Fail(_) => return Err(PickError::Cancelled),
        };
        Ok(ids.into_iter().filter(|id| allowed.contains(id)).collect())
    }

    fn pick_by_rectangle(
        &mut self,
        prompt: &str,
        allow: PickPredicate<'_>,
    ) -> Result<Vec<EntityId>, PickError> {
        let ids = match self.next_pick(prompt)? {
            ScriptedPick::Object(id) => vec![id],
            ScriptedPick::Objects(ids) => ids,
            ScriptedPick::Cancel | ScriptedPick::Fail(_) => return Err(PickError::Cancelled),
        };
        Ok(ids
            .into_iter()
            .filter(|id| {
                self.document
                    .entity(*id)
                    .is_some_and(|entity| allow(entity, &self.document))
            })
            .collect())
    }
}
