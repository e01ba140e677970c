use dashboard::{CatalogSink, FieldContext};
use payloads::{ClientError, Field, FieldId};
use yewdux::prelude::*;

use crate::{State, get_api_client};

/// The shared application context, backed by the yewdux store.
#[derive(Clone)]
pub struct StoreContext {
    dispatch: Dispatch<State>,
}

impl StoreContext {
    pub fn new(dispatch: Dispatch<State>) -> Self {
        Self { dispatch }
    }
}

impl FieldContext for StoreContext {
    fn snapshot(&self) -> dashboard::ContextSnapshot {
        self.dispatch.get().context_snapshot()
    }

    fn set_selected_field(&self, field_id: Option<FieldId>) {
        self.dispatch.reduce_mut(|state| {
            state.set_selected_field(field_id);
        });
    }

    async fn refresh_fields(&self) -> Result<(), ClientError> {
        let fields = get_api_client().fields().await?;
        self.dispatch.reduce_mut(|state| {
            state.set_fields(fields);
        });
        Ok(())
    }
}

impl CatalogSink for StoreContext {
    fn publish_catalog(&self, fields: Vec<Field>) {
        self.dispatch.reduce_mut(|state| {
            state.set_catalog(fields);
        });
    }
}
