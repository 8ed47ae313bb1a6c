//! Vorfilter nach Raumbeziehung und Raum-Kontakt.
//!
//! Die fünf Methoden werden ODER-verknüpft: drei Raumbeziehungen des Hosts
//! (enthalten, Zielraum, Herkunftsraum) und die geometrische Kontakterkennung
//! (Flächenkontakt, Volumenkollision).

use std::collections::HashSet;

use crate::app::error::SelectionError;
use crate::core::{ContactDetector, ContactType, Document, EntityId, RoomRelation, SpatialIndex};
use crate::shared::RoomFailurePolicy;

/// Ein gewählter Raum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEntry {
    /// ID der Raum-Entität
    pub id: EntityId,
    /// Anzeigename
    pub name: String,
}

/// Einzeln schaltbare Methode des Raumfilters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomMethod {
    /// Element liegt im Raum
    Contained,
    /// Zielraum des Elements
    Destination,
    /// Herkunftsraum des Elements
    Origin,
    /// Flächenkontakt mit dem Raumvolumen
    SurfaceContact,
    /// Volumenkollision mit dem Raumvolumen
    VolumetricCollision,
}

impl RoomMethod {
    /// Raumbeziehung des Hosts, falls es eine Beziehungsmethode ist.
    fn relation(self) -> Option<RoomRelation> {
        match self {
            RoomMethod::Contained => Some(RoomRelation::Contained),
            RoomMethod::Destination => Some(RoomRelation::Destination),
            RoomMethod::Origin => Some(RoomRelation::Origin),
            RoomMethod::SurfaceContact | RoomMethod::VolumetricCollision => None,
        }
    }
}

/// Schalter der fünf Methoden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoomMethods {
    pub contained: bool,
    pub destination: bool,
    pub origin: bool,
    pub surface_contact: bool,
    pub volumetric_collision: bool,
}

impl RoomMethods {
    /// Zustand einer Methode.
    pub fn is_enabled(&self, method: RoomMethod) -> bool {
        match method {
            RoomMethod::Contained => self.contained,
            RoomMethod::Destination => self.destination,
            RoomMethod::Origin => self.origin,
            RoomMethod::SurfaceContact => self.surface_contact,
            RoomMethod::VolumetricCollision => self.volumetric_collision,
        }
    }

    /// Schaltet eine Methode.
    pub fn set(&mut self, method: RoomMethod, enabled: bool) {
        let flag = match method {
            RoomMethod::Contained => &mut self.contained,
            RoomMethod::Destination => &mut self.destination,
            RoomMethod::Origin => &mut self.origin,
            RoomMethod::SurfaceContact => &mut self.surface_contact,
            RoomMethod::VolumetricCollision => &mut self.volumetric_collision,
        };
        *flag = enabled;
    }

    fn uses_geometry(&self) -> bool {
        self.surface_contact || self.volumetric_collision
    }

    fn accepts(&self, contact: ContactType) -> bool {
        match contact {
            ContactType::SurfaceContact => self.surface_contact,
            ContactType::VolumetricCollision => self.volumetric_collision,
            ContactType::None => false,
        }
    }
}

/// Elemente mit Beziehung oder Kontakt zu den gewählten Räumen.
#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    rooms: Vec<RoomEntry>,
    methods: RoomMethods,
    failure_policy: RoomFailurePolicy,
}

impl RoomFilter {
    /// Erstellt einen leeren Filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entfernt gewählte Räume, die es im Dokument nicht mehr gibt.
    pub fn init(&mut self, document: &dyn Document) {
        let before = self.rooms.len();
        self.rooms
            .retain(|room| document.entity(room.id).is_some_and(|e| e.is_room()));
        if self.rooms.len() != before {
            log::debug!("{} Räume nicht mehr im Dokument", before - self.rooms.len());
        }
    }

    /// Gewählte Räume.
    pub fn rooms(&self) -> &[RoomEntry] {
        &self.rooms
    }

    /// IDs der gewählten Räume.
    pub fn room_ids(&self) -> Vec<EntityId> {
        self.rooms.iter().map(|room| room.id).collect()
    }

    /// Ersetzt die gewählten Räume; IDs ohne Raum im Dokument werden übergangen.
    pub fn set_rooms(&mut self, document: &dyn Document, ids: &[EntityId]) {
        let mut seen = HashSet::new();
        self.rooms = ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| document.entity(*id))
            .filter(|entity| entity.is_room())
            .map(|entity| RoomEntry {
                id: entity.id,
                name: entity.name.clone(),
            })
            .collect();
    }

    /// Entfernt alle gewählten Räume.
    pub fn clear_rooms(&mut self) {
        self.rooms.clear();
    }

    /// Alle Räume des Dokuments, die gewählt werden dürfen.
    pub fn available_rooms(document: &dyn Document) -> HashSet<EntityId> {
        document.rooms().into_iter().map(|room| room.id).collect()
    }

    /// Schalter der Methoden.
    pub fn methods(&self) -> &RoomMethods {
        &self.methods
    }

    /// Schaltet eine Methode.
    pub fn set_method(&mut self, method: RoomMethod, enabled: bool) {
        self.methods.set(method, enabled);
    }

    /// Verhalten bei nicht lesbarer Raumgeometrie.
    pub fn failure_policy(&self) -> RoomFailurePolicy {
        self.failure_policy
    }

    /// Setzt das Verhalten bei nicht lesbarer Raumgeometrie.
    pub fn set_failure_policy(&mut self, policy: RoomFailurePolicy) {
        self.failure_policy = policy;
    }

    /// Vereinigung aller Methoden; ohne gewählte Räume leer.
    pub fn filtered_elements(
        &self,
        document: &dyn Document,
        detector: &ContactDetector,
    ) -> Result<HashSet<EntityId>, SelectionError> {
        let mut elements = HashSet::new();
        if self.rooms.is_empty() {
            return Ok(elements);
        }
        let room_ids: HashSet<EntityId> = self.rooms.iter().map(|room| room.id).collect();

        let relations: Vec<RoomRelation> = [
            RoomMethod::Contained,
            RoomMethod::Destination,
            RoomMethod::Origin,
        ]
        .into_iter()
        .filter(|method| self.methods.is_enabled(*method))
        .filter_map(RoomMethod::relation)
        .collect();

        if !relations.is_empty() {
            for entity in document.non_type_entities() {
                let related = relations.iter().any(|relation| {
                    document
                        .room_of(entity.id, *relation)
                        .is_some_and(|room| room_ids.contains(&room))
                });
                if related {
                    elements.insert(entity.id);
                }
            }
        }

        if self.methods.uses_geometry() {
            self.collect_contacts(document, detector, &mut elements)?;
        }

        Ok(elements)
    }

    fn collect_contacts(
        &self,
        document: &dyn Document,
        detector: &ContactDetector,
        elements: &mut HashSet<EntityId>,
    ) -> Result<(), SelectionError> {
        let index = SpatialIndex::from_document(document);

        for room in &self.rooms {
            if document.entity(room.id).is_none() {
                continue;
            }
            match detector.contacts_with(document, room.id, &index) {
                Ok(contacts) => {
                    elements.extend(
                        contacts
                            .into_iter()
                            .filter(|(_, contact)| self.methods.accepts(*contact))
                            .map(|(id, _)| id),
                    );
                }
                Err(source) => match self.failure_policy {
                    RoomFailurePolicy::Abort => {
                        return Err(SelectionError::ContactComputation {
                            room: room.id,
                            source,
                        });
                    }
                    RoomFailurePolicy::Isolate => {
                        log::warn!(
                            "Kontaktberechnung für Raum {} übersprungen: {}",
                            room.id,
                            source
                        );
                    }
                },
            }
        }
        Ok(())
    }
}
