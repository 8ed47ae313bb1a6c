//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die `app`, Binary und Tests gemeinsam nutzen.

pub mod options;

pub use options::{
    DeliveryMode, EngineOptions, RoomFailurePolicy, CONTACT_BBOX_MARGIN, CONTACT_TOLERANCE,
    SHORT_VALUE_MAX_CHARS,
};
