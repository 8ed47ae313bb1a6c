//! Anzeigenamen für Kategorie-Schlüssel.

use super::document::Document;

/// Präfix eingebauter Kategorie-Schlüssel.
const CATEGORY_PREFIX: &str = "OST_";

/// Liefert den Anzeigenamen einer Kategorie.
///
/// Bevorzugt den Namen aus dem Dokument, sonst wird der Schlüssel lesbar
/// gemacht (`OST_GenericModel` → `Generic Model`).
pub fn category_label(document: &dyn Document, category: &str) -> String {
    document
        .category_name(category)
        .unwrap_or_else(|| readable_category_key(category))
}

/// Entfernt das Präfix und trennt PascalCase-Wörter durch Leerzeichen.
pub fn readable_category_key(category: &str) -> String {
    let key = category.strip_prefix(CATEGORY_PREFIX).unwrap_or(category);
    if key.trim().is_empty() {
        return key.to_string();
    }

    let mut label = String::with_capacity(key.len() * 2);
    let mut previous: Option<char> = None;
    for ch in key.chars() {
        if ch.is_uppercase() && previous.is_some_and(|p| p != ' ') {
            label.push(' ');
        }
        label.push(ch);
        previous = Some(ch);
    }
    label
}
