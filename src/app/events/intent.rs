use crate::app::prefilter::{PrefilterKind, RoomMethod};
use crate::app::use_cases::selection::SelectionAction;
use crate::core::{EntityId, FilterId};
use crate::shared::EngineOptions;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus Host/UI ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Aktives Dokument wurde gewechselt oder neu geladen
    DocumentChanged,
    /// Stichprobe nehmen (Host fordert ein Element an)
    TakeSampleRequested,
    /// Gefilterte Elemente anwenden, hinzufügen oder entfernen
    SelectionActionRequested { action: SelectionAction },
    /// Rechteck-Auswahl mit der Filterkette als ODER-Prädikat
    PickByRectangleRequested,
    /// Räume für den Raumfilter wählen
    SelectRoomsRequested,
    /// Gewählte Räume verwerfen
    ClearRoomsRequested,
    /// Vorfilter aktivieren oder deaktivieren
    PrefilterActivationChanged { kind: PrefilterKind, active: bool },
    /// Kategorie an- oder abhaken
    CategoryToggled { key: String },
    /// Kategorie über das Entfernen-Symbol abwählen
    CategoryRemoved { key: String },
    /// Suchtext im Kategorie-Katalog geändert
    CategorySearchChanged { text: String },
    /// Suchtext im Kategorie-Katalog geleert
    CategorySearchCleared,
    /// Alle sichtbaren Kategorien anhaken
    SelectAllCategoriesRequested,
    /// Alle Kategorien abhaken
    DeselectAllCategoriesRequested,
    /// Sichtbare Kategorien invertieren
    InvertCategoriesRequested,
    /// Geschoss an- oder abhaken
    LevelToggled { level: EntityId },
    /// Raum-Methode ein- oder ausschalten
    RoomMethodChanged { method: RoomMethod, enabled: bool },
    /// Zeilen der Filterliste markiert
    FilterRowsSelected { ids: Vec<FilterId> },
    /// Markierte Filter löschen
    DeleteSelectedFiltersRequested,
    /// Alle Filter löschen
    DeleteAllFiltersRequested,
    /// Optionen übernehmen
    OptionsChanged { options: Box<EngineOptions> },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
    /// Aktuelle Optionen in die Konfigurationsdatei schreiben
    SaveOptionsRequested,
}
