use payloads::{ClientError, Field, FieldId};
use std::future::Future;

/// The parts of the shared application context a resolution cycle reads.
///
/// Cycles are triggered by changes to either member, so the snapshot is also
/// what the view layer compares to decide whether to start a new cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSnapshot {
    pub selected_field: Option<FieldId>,
    pub fields: Vec<Field>,
}

impl ContextSnapshot {
    pub fn new(selected_field: Option<FieldId>, fields: Vec<Field>) -> Self {
        Self {
            selected_field,
            fields,
        }
    }
}

/// Shared application context owned outside the dashboard.
pub trait FieldContext {
    fn snapshot(&self) -> ContextSnapshot;

    /// Only ever called in response to an explicit user selection.
    fn set_selected_field(&self, field_id: Option<FieldId>);

    /// Reload the shared field list.
    fn refresh_fields(&self) -> impl Future<Output = Result<(), ClientError>>;
}

/// Record a user's choice of field in the shared context.
///
/// The resulting context change is what triggers the next resolution cycle;
/// nothing is fetched here.
pub fn select_field(context: &impl FieldContext, field_id: FieldId) {
    tracing::info!(%field_id, "Field selected");
    context.set_selected_field(Some(field_id));
}
