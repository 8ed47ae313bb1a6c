//! Application Controller für zentrale Event-Verarbeitung.

use super::host::HostContext;
use super::{AppCommand, AppIntent, Session};

/// Orchestriert Host-Events und Use-Cases auf der Session.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        session: &mut Session,
        host: &mut dyn HostContext,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(session, intent);
        for command in commands {
            self.handle_command(session, host, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, session: &Session, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(session, intent)
    }

    /// Führt mutierende Commands auf der Session aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        session: &mut Session,
        host: &mut dyn HostContext,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        session.command_log.record(command.clone());
        use super::handlers;

        match command {
            // === Session & Optionen ===
            AppCommand::InitSession => handlers::session::init(session, host),
            AppCommand::ApplyOptions { options } => {
                handlers::session::apply_options(session, *options)
            }
            AppCommand::ResetOptions => handlers::session::reset_options(session),
            AppCommand::SaveOptions => handlers::session::save_options(session)?,

            // === Host-Interaktion ===
            AppCommand::TakeSample => handlers::selection::take_sample(session, host)?,
            AppCommand::ApplySelection { action } => {
                handlers::selection::apply(session, host, action)?
            }
            AppCommand::PickByRectangle => handlers::selection::pick_by_rectangle(session, host)?,
            AppCommand::SelectRooms => handlers::selection::select_rooms(session, host)?,
            AppCommand::ClearRooms => handlers::selection::clear_rooms(session),

            // === Vorfilter ===
            AppCommand::SetPrefilterActive { kind, active } => {
                handlers::prefilter::set_active(session, kind, active)
            }
            AppCommand::ToggleCategory { key } => {
                handlers::prefilter::toggle_category(session, &key)
            }
            AppCommand::SetCategoryChecked { key, checked } => {
                handlers::prefilter::set_category_checked(session, &key, checked)
            }
            AppCommand::SetCategorySearch { text } => {
                handlers::prefilter::set_category_search(session, &text)
            }
            AppCommand::SelectAllVisibleCategories => {
                handlers::prefilter::select_all_visible_categories(session)
            }
            AppCommand::DeselectAllCategories => {
                handlers::prefilter::deselect_all_categories(session)
            }
            AppCommand::InvertVisibleCategories => {
                handlers::prefilter::invert_visible_categories(session)
            }
            AppCommand::ToggleLevel { level } => handlers::prefilter::toggle_level(session, level),
            AppCommand::SetRoomMethod { method, enabled } => {
                handlers::prefilter::set_room_method(session, method, enabled)
            }

            // === Filterliste ===
            AppCommand::SelectFilterRows { ids } => handlers::filters::select_rows(session, &ids),
            AppCommand::RemoveFilters { ids } => handlers::filters::remove(session, &ids),
            AppCommand::RemoveAllFilters => handlers::filters::remove_all(session),
        }

        Ok(())
    }
}
