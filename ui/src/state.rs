use dashboard::{ContextSnapshot, FieldCatalog};
use payloads::{Field, FieldId};
use yewdux::prelude::*;

use crate::hooks::FetchState;

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Shared context (selection + field list, managed by use_shared_fields) ===
    pub selected_field: Option<FieldId>,
    pub fields: FetchState<Vec<Field>>,

    // === Dashboard catalog (managed by use_field_catalog) ===
    pub catalog: FieldCatalog,
}

impl State {
    pub fn has_fields_loaded(&self) -> bool {
        self.fields.is_fetched()
    }

    pub fn get_fields(&self) -> &[Field] {
        self.fields.as_ref().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn set_fields(&mut self, fields: Vec<Field>) {
        self.fields = FetchState::Fetched(fields);
    }

    pub fn set_selected_field(&mut self, field_id: Option<FieldId>) {
        self.selected_field = field_id;
    }

    pub fn set_catalog(&mut self, fields: Vec<Field>) {
        self.catalog = FieldCatalog::new(fields);
    }

    /// What a resolution cycle reads from the shared context. A change in
    /// this value is what starts a new cycle.
    pub fn context_snapshot(&self) -> ContextSnapshot {
        ContextSnapshot::new(
            self.selected_field.clone(),
            self.get_fields().to_vec(),
        )
    }
}
