//! Application-Layer: Controller, Session, Events, Marshal und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod error;
pub mod events;
pub mod feedback;
pub mod handlers;
pub mod host;
mod intent_mapping;
pub mod marshal;
pub mod prefilter;
/// Session-State
///
/// Dieses Modul verwaltet den Zustand einer Selektions-Sitzung (Vorfilter, Filterkette, Optionen).
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use error::{PickError, SelectionError};
pub use events::{AppCommand, AppIntent};
pub use feedback::{Feedback, FeedbackMessage};
pub use host::{HostContext, MemoryHost, ScriptedPick};
pub use marshal::{EventMarshal, ExternalHandler, HandlerContext, HandlerWrapper, IntentHandler};
pub use prefilter::{
    CategoryFilter, GeneralFilter, LevelFilter, PrefilterKind, PrefilterOption, RoomFilter,
    RoomMethod,
};
pub use state::Session;
pub use use_cases::selection::SelectionAction;
