//! Mapping von Host-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, Session};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(session: &Session, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::DocumentChanged => vec![AppCommand::InitSession],
        AppIntent::TakeSampleRequested => vec![AppCommand::TakeSample],
        AppIntent::SelectionActionRequested { action } => {
            vec![AppCommand::ApplySelection { action }]
        }
        AppIntent::PickByRectangleRequested => vec![AppCommand::PickByRectangle],
        AppIntent::SelectRoomsRequested => vec![AppCommand::SelectRooms],
        AppIntent::ClearRoomsRequested => vec![AppCommand::ClearRooms],
        AppIntent::PrefilterActivationChanged { kind, active } => {
            vec![AppCommand::SetPrefilterActive { kind, active }]
        }
        AppIntent::CategoryToggled { key } => vec![AppCommand::ToggleCategory { key }],
        AppIntent::CategoryRemoved { key } => vec![AppCommand::SetCategoryChecked {
            key,
            checked: false,
        }],
        AppIntent::CategorySearchChanged { text } => vec![AppCommand::SetCategorySearch { text }],
        AppIntent::CategorySearchCleared => vec![AppCommand::SetCategorySearch {
            text: String::new(),
        }],
        AppIntent::SelectAllCategoriesRequested => vec![AppCommand::SelectAllVisibleCategories],
        AppIntent::DeselectAllCategoriesRequested => vec![AppCommand::DeselectAllCategories],
        AppIntent::InvertCategoriesRequested => vec![AppCommand::InvertVisibleCategories],
        AppIntent::LevelToggled { level } => vec![AppCommand::ToggleLevel { level }],
        AppIntent::RoomMethodChanged { method, enabled } => {
            vec![AppCommand::SetRoomMethod { method, enabled }]
        }
        AppIntent::FilterRowsSelected { ids } => vec![AppCommand::SelectFilterRows { ids }],
        AppIntent::DeleteSelectedFiltersRequested => {
            if session.selected_filters.is_empty() {
                Vec::new()
            } else {
                vec![AppCommand::RemoveFilters {
                    ids: session.selected_filters.clone(),
                }]
            }
        }
        AppIntent::DeleteAllFiltersRequested => vec![AppCommand::RemoveAllFilters],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ResetOptionsRequested => vec![AppCommand::ResetOptions],
        AppIntent::SaveOptionsRequested => vec![AppCommand::SaveOptions],
    }
}
