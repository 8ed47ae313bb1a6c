//! Use-Cases der Application-Layer-Orchestrierung.

pub mod rooms;
pub mod sampling;
pub mod selection;
