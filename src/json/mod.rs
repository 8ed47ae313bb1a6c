//! JSON-Import für Dokument-Snapshots.
//!
//! Ein Snapshot beschreibt Entitäten, Geschosse, Ansichten und Kategorienamen
//! so, wie ein Host sie der Engine übergeben würde.

pub mod parser;

pub use parser::{load_document, parse_document};
