use crate::app::prefilter::{PrefilterKind, RoomMethod};
use crate::app::use_cases::selection::SelectionAction;
use crate::core::{EntityId, FilterId};
use crate::shared::EngineOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Vorfilter-Kataloge für das aktive Dokument aufbauen
    InitSession,
    /// Element anfordern und seine Parameter als Filter erfassen
    TakeSample,
    /// Zielmenge auflösen und mit der Host-Selektion kombinieren
    ApplySelection { action: SelectionAction },
    /// Rechteck-Auswahl über den Host starten
    PickByRectangle,
    /// Räume über den Host wählen
    SelectRooms,
    /// Raumliste leeren
    ClearRooms,
    /// Vorfilter aktivieren oder deaktivieren
    SetPrefilterActive { kind: PrefilterKind, active: bool },
    /// Kategorie umschalten
    ToggleCategory { key: String },
    /// Haken einer Kategorie setzen
    SetCategoryChecked { key: String, checked: bool },
    /// Suchtext des Kategorie-Katalogs setzen
    SetCategorySearch { text: String },
    /// Alle sichtbaren Kategorien anhaken
    SelectAllVisibleCategories,
    /// Alle Kategorien abhaken
    DeselectAllCategories,
    /// Sichtbare Kategorien invertieren
    InvertVisibleCategories,
    /// Geschoss umschalten
    ToggleLevel { level: EntityId },
    /// Raum-Methode setzen
    SetRoomMethod { method: RoomMethod, enabled: bool },
    /// Zeilen der Filterliste markieren
    SelectFilterRows { ids: Vec<FilterId> },
    /// Filter nach ID entfernen
    RemoveFilters { ids: Vec<FilterId> },
    /// Alle Filter entfernen
    RemoveAllFilters,
    /// Neue Optionen übernehmen
    ApplyOptions { options: Box<EngineOptions> },
    /// Standard-Optionen übernehmen
    ResetOptions,
    /// Optionen persistieren
    SaveOptions,
}
