//! Rückmeldungen an den Benutzer (Anzahl selektierter Elemente, Fehlermeldungen).

use std::collections::VecDeque;

/// Eine Rückmeldung für die Präsentationsschicht.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackMessage {
    /// Anzahl der nach einer Aktion selektierten Elemente
    SelectionCount(usize),
    /// Sichtbare Fehlermeldung
    Error(String),
}

impl FeedbackMessage {
    /// Anzeigetext der Meldung.
    pub fn text(&self) -> String {
        match self {
            FeedbackMessage::SelectionCount(count) => selection_count_message(*count),
            FeedbackMessage::Error(message) => message.clone(),
        }
    }
}

/// Formuliert die Anzahl selektierter Elemente (0 / 1 / Plural).
pub fn selection_count_message(count: usize) -> String {
    match count {
        0 => "Kein Element ausgewählt".to_string(),
        1 => "1 Element ausgewählt".to_string(),
        n => format!("{n} Elemente ausgewählt"),
    }
}

/// Begrenzte Warteschlange von Rückmeldungen.
#[derive(Debug, Clone)]
pub struct Feedback {
    messages: VecDeque<FeedbackMessage>,
    capacity: usize,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(crate::shared::options::FEEDBACK_CAPACITY)
    }
}

impl Feedback {
    /// Erstellt eine leere Warteschlange; ältere Meldungen fallen bei vollem Puffer heraus.
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Ändert die Kapazität (überzählige alte Meldungen werden verworfen).
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// Reiht eine Meldung ein.
    pub fn push(&mut self, message: FeedbackMessage) {
        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Meldet die Anzahl selektierter Elemente.
    pub fn report_selection_count(&mut self, count: usize) {
        log::info!("{}", selection_count_message(count));
        self.push(FeedbackMessage::SelectionCount(count));
    }

    /// Meldet einen Fehler.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.push(FeedbackMessage::Error(message.into()));
    }

    /// Letzte Meldung.
    pub fn last(&self) -> Option<&FeedbackMessage> {
        self.messages.back()
    }

    /// Anzahl wartender Meldungen.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Gibt `true` zurück, wenn keine Meldungen warten.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Entnimmt alle Meldungen in Eingangsreihenfolge.
    pub fn drain(&mut self) -> Vec<FeedbackMessage> {
        self.messages.drain(..).collect()
    }
}
