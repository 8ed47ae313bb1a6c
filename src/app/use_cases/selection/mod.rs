//! Use-Case-Funktionen für die Selektion.
//!
//! Aufgeteilt nach Schritt:
//! - `resolve`: Vorfilter-Schnittmenge und Parameter-Filterkette
//! - `action`: Anwenden, Hinzufügen, Entfernen gegen die Host-Selektion
//! - `rect`: Rechteck-Auswahl mit ODER über die Filterkette

mod action;
mod rect;
mod resolve;

pub use action::{apply_action, apply_to_host, SelectionAction};
pub use rect::{pick_by_rectangle, RECTANGLE_PROMPT};
pub use resolve::{prefiltered_entities, resolve_target_ids};
