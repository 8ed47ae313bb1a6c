//! Vorfilter "nur in der aktiven Ansicht sichtbar".

use std::collections::HashSet;

use crate::app::error::SelectionError;
use crate::core::{Document, EntityId};

/// Alle in der aktiven räumlichen Ansicht sichtbaren Exemplare.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveViewFilter;

impl ActiveViewFilter {
    /// Fehler `NoActiveView`, wenn keine räumliche Ansicht aktiv ist.
    pub fn filtered_elements(
        &self,
        document: &dyn Document,
    ) -> Result<HashSet<EntityId>, SelectionError> {
        let view = document.active_view().ok_or(SelectionError::NoActiveView)?;
        Ok(document
            .entities_visible_in_view(view)
            .into_iter()
            .filter(|entity| !entity.is_type)
            .map(|entity| entity.id)
            .collect())
    }
}
