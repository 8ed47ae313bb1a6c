//! Entitäten und Parameter, wie sie der Host liefert.
//!
//! Die Engine besitzt keine Entitäten: Sie werden vom Host (bzw. vom
//! `MemoryDocument`) bereitgestellt und nur gelesen.

use serde::{Deserialize, Serialize};

/// Stabile ID einer Entität im Dokument.
pub type EntityId = u64;

/// Kategorie-Schlüssel der Räume.
pub const ROOM_CATEGORY: &str = "OST_Rooms";

/// Speicherart eines Parameterwerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Freitext
    Text,
    /// Gleitkommazahl (Länge, Fläche, …)
    Number,
    /// Ganzzahl / Ja-Nein
    Integer,
    /// Verweis auf eine andere Entität
    Reference,
    /// Kein Wert
    #[default]
    None,
}

/// Besitzer-Ebene eines Parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerScope {
    /// Parameter hängt am Exemplar
    #[default]
    Instance,
    /// Parameter hängt am Typ
    Type,
}

impl OwnerScope {
    /// Anzeigetext der Ebene.
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerScope::Instance => "Instance",
            OwnerScope::Type => "Type",
        }
    }
}

/// Anzeigewert eines Parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Wert als Anzeigetext
    Text(String),
    /// Parameter ohne Wert
    #[default]
    Empty,
    /// Wert konnte vom Host nicht in Text umgewandelt werden
    Unreadable,
}

impl AttributeValue {
    /// Liefert den Text für Vergleiche: `Empty` wird zu `""`, `Unreadable` zu `None`.
    pub fn readable_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text.as_str()),
            AttributeValue::Empty => Some(""),
            AttributeValue::Unreadable => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        AttributeValue::Text(text.to_string())
    }
}

/// Ein benannter, typisierter Wert an einer Entität oder deren Typ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Anzeigename (ggf. lokalisiert)
    pub name: String,
    /// Speicherart
    #[serde(default)]
    pub storage_kind: StorageKind,
    /// Gemeinsam genutzter Parameter
    #[serde(default)]
    pub is_shared: bool,
    /// Stabile ID gemeinsam genutzter Parameter
    #[serde(default)]
    pub shared_id: Option<String>,
    /// Stabiler Code eingebauter Parameter
    #[serde(default)]
    pub builtin_code: Option<i64>,
    /// Anzeigewert
    #[serde(default)]
    pub value: AttributeValue,
}

impl Attribute {
    /// Erstellt einen projektspezifischen Parameter ohne stabile IDs.
    pub fn new(name: &str, storage_kind: StorageKind, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.to_string(),
            storage_kind,
            is_shared: false,
            shared_id: None,
            builtin_code: None,
            value: value.into(),
        }
    }

    /// Markiert den Parameter als gemeinsam genutzt.
    pub fn shared(mut self, shared_id: &str) -> Self {
        self.is_shared = true;
        self.shared_id = Some(shared_id.to_string());
        self
    }

    /// Setzt den Code eines eingebauten Parameters.
    pub fn builtin(mut self, code: i64) -> Self {
        self.builtin_code = Some(code);
        self
    }
}

/// Auswählbares Domänenobjekt mit Kategorie und Parametern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Eindeutige ID
    pub id: EntityId,
    /// Anzeigename
    #[serde(default)]
    pub name: String,
    /// Kategorie-Schlüssel (z.B. `OST_Walls`)
    #[serde(default)]
    pub category: Option<String>,
    /// Typ-Entität (geteilte Definition vieler Exemplare)
    #[serde(default)]
    pub is_type: bool,
    /// Verweis auf die Typ-Entität
    #[serde(default)]
    pub type_id: Option<EntityId>,
    /// Parameter in Host-Reihenfolge
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl Entity {
    /// Erstellt ein Exemplar ohne Parameter.
    pub fn new(id: EntityId, name: &str, category: Option<&str>) -> Self {
        Self {
            id,
            name: name.to_string(),
            category: category.map(str::to_string),
            is_type: false,
            type_id: None,
            attributes: Vec::new(),
        }
    }

    /// Erstellt eine Typ-Entität ohne Parameter.
    pub fn new_type(id: EntityId, name: &str, category: Option<&str>) -> Self {
        Self {
            is_type: true,
            ..Self::new(id, name, category)
        }
    }

    /// Hängt einen Parameter an.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Setzt die Typ-Entität.
    pub fn with_type(mut self, type_id: EntityId) -> Self {
        self.type_id = Some(type_id);
        self
    }

    /// Ebene, der die Parameter dieser Entität angehören.
    pub fn owner_scope(&self) -> OwnerScope {
        if self.is_type {
            OwnerScope::Type
        } else {
            OwnerScope::Instance
        }
    }

    /// Gibt `true` zurück, wenn die Entität ein Raum ist.
    pub fn is_room(&self) -> bool {
        self.category.as_deref() == Some(ROOM_CATEGORY)
    }
}

/// Geschoss mit Höhenlage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// ID der Geschoss-Entität
    pub id: EntityId,
    /// Anzeigename
    pub name: String,
    /// Höhenlage (Projekteinheiten)
    pub elevation: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_entities_own_type_scoped_attributes() {
        let instance = Entity::new(1, "Wand", Some("OST_Walls"));
        let wall_type = Entity::new_type(2, "Basiswand", Some("OST_Walls"));

        assert_eq!(instance.owner_scope(), OwnerScope::Instance);
        assert_eq!(wall_type.owner_scope(), OwnerScope::Type);
    }

    #[test]
    fn empty_value_reads_as_empty_text_and_unreadable_as_none() {
        assert_eq!(AttributeValue::Empty.readable_text(), Some(""));
        assert_eq!(AttributeValue::Unreadable.readable_text(), None);
        assert_eq!(AttributeValue::from("EG").readable_text(), Some("EG"));
    }
}
