//! SelectMore Selektions-Engine.
//! Core-Funktionalität als Library exportiert für Hosts, Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod json;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, EventMarshal, Feedback, FeedbackMessage, HostContext,
    IntentHandler, MemoryHost, PickError, PrefilterKind, ScriptedPick, SelectionAction,
    SelectionError, Session,
};
pub use core::{
    Attribute, AttributeFilter, AttributeFilterChain, AttributeValue, ContactDetector,
    ContactType, Document, Entity, EntityId, GeometryError, MemoryDocument, SpatialIndex,
};
pub use json::{load_document, parse_document};
pub use shared::{DeliveryMode, EngineOptions, RoomFailurePolicy};
