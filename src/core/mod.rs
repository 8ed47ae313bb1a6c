//! Core-Domänentypen: Entitäten, Parameter-Filter, Geometrie, Kontakterkennung, Spatial-Index.

pub mod attribute_filter;
pub mod contact;
/// Host-Schnittstelle für lesenden Dokumentzugriff
///
/// Dieses Modul definiert die Traits, die ein Host implementiert:
/// - EntitySource: Lookup einzelner Entitäten
/// - Document: Abfragen nach Kategorie, Ansicht, Geschoss, Raum und Geometrie
pub mod document;
pub mod entity;
pub mod geometry;
pub mod identity;
pub mod label;
pub mod memory_document;
pub mod spatial;

pub use attribute_filter::{
    normalize_value, sample_attributes, AttributeFilter, AttributeFilterChain, FilterId,
    UNKNOWN_ATTRIBUTE_LABEL,
};
pub use contact::{ContactDetector, ContactSettings, ContactType};
pub use document::{DetailLevel, Document, EntitySource, RoomRelation, ViewId};
pub use entity::{
    Attribute, AttributeValue, Entity, EntityId, Level, OwnerScope, StorageKind, ROOM_CATEGORY,
};
pub use geometry::{Aabb, BoxSolid, Face, GeometryError, PlanarFace, Solid, UvRect};
pub use identity::AttributeIdentity;
pub use label::category_label;
pub use memory_document::MemoryDocument;
pub use spatial::SpatialIndex;
