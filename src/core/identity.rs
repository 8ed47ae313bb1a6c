//! Äquivalenzschlüssel für Parameter.
//!
//! Anzeigenamen sind lokalisiert und mehrdeutig. Die Identität bevorzugt daher
//! stabile Kennungen in fester Reihenfolge:
//! 1. Shared-ID (nur wenn der Parameter geteilt ist und eine ID trägt)
//! 2. Built-in-Code
//! 3. Name + Speicherart + Besitzer-Ebene

use std::hash::{Hash, Hasher};

use super::entity::{Attribute, OwnerScope, StorageKind};

/// Kanonischer Vergleichsschlüssel, einmalig aus der Prioritätsregel bestimmt.
#[derive(Debug, PartialEq, Eq, Hash)]
enum IdentityKey<'a> {
    Shared(&'a str),
    BuiltIn(i64),
    Named {
        name: &'a str,
        storage_kind: StorageKind,
        owner_scope: OwnerScope,
    },
}

/// Abgeleitete Identität eines Parameters.
///
/// `==` und `Hash` arbeiten beide auf demselben kanonischen Schlüssel, gleiche
/// Identitäten landen also immer im selben Bucket.
#[derive(Debug, Clone)]
pub struct AttributeIdentity {
    /// Anzeigename zum Zeitpunkt der Erfassung
    pub name: String,
    /// Gemeinsam genutzter Parameter
    pub is_shared: bool,
    /// Shared-ID (nur bei geteilten Parametern)
    pub shared_id: Option<String>,
    /// Built-in-Code
    pub builtin_code: Option<i64>,
    /// Speicherart
    pub storage_kind: StorageKind,
    /// Besitzer-Ebene
    pub owner_scope: OwnerScope,
}

impl AttributeIdentity {
    /// Leitet die Identität eines Parameters für die gegebene Ebene ab.
    pub fn of(attribute: &Attribute, owner_scope: OwnerScope) -> Self {
        Self {
            name: attribute.name.clone(),
            is_shared: attribute.is_shared,
            shared_id: if attribute.is_shared {
                attribute.shared_id.clone()
            } else {
                None
            },
            builtin_code: attribute.builtin_code,
            storage_kind: attribute.storage_kind,
            owner_scope,
        }
    }

    fn key(&self) -> IdentityKey<'_> {
        if self.is_shared {
            if let Some(shared_id) = self.shared_id.as_deref() {
                return IdentityKey::Shared(shared_id);
            }
        }
        if let Some(code) = self.builtin_code {
            return IdentityKey::BuiltIn(code);
        }
        IdentityKey::Named {
            name: &self.name,
            storage_kind: self.storage_kind,
            owner_scope: self.owner_scope,
        }
    }

    /// Prüft, ob ein Parameter (auf der gegebenen Ebene) dieselbe Identität hat.
    pub fn matches(&self, attribute: &Attribute, owner_scope: OwnerScope) -> bool {
        *self == Self::of(attribute, owner_scope)
    }
}

impl PartialEq for AttributeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for AttributeIdentity {}

impl Hash for AttributeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
