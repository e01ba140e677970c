use dashboard::{ContextSnapshot, DataService, FieldContext};
use payloads::{ClientError, Field, FieldId};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::MockDataService;

#[derive(Default)]
struct ContextState {
    selected_field: Option<FieldId>,
    fields: Vec<Field>,
    refresh_delay: Duration,
    refresh_calls: usize,
    selections: Vec<Option<FieldId>>,
}

/// Shared application context backed by a [`MockDataService`]. Refreshing
/// reloads the field list from the service's catalog.
#[derive(Clone)]
pub struct MockContext {
    service: MockDataService,
    state: Rc<RefCell<ContextState>>,
}

impl MockContext {
    pub fn new(service: MockDataService, fields: Vec<Field>) -> Self {
        Self {
            service,
            state: Rc::new(RefCell::new(ContextState {
                fields,
                ..ContextState::default()
            })),
        }
    }

    /// Change the selection the way another part of the app would, without
    /// going through the user-selection path.
    pub fn set_selection(&self, field_id: Option<FieldId>) {
        self.state.borrow_mut().selected_field = field_id;
    }

    pub fn set_fields(&self, fields: Vec<Field>) {
        self.state.borrow_mut().fields = fields;
    }

    /// Extra time each refresh takes on top of the catalog fetch.
    pub fn delay_refresh(&self, duration: Duration) {
        self.state.borrow_mut().refresh_delay = duration;
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.borrow().refresh_calls
    }

    /// Every value passed to `set_selected_field`, in order.
    pub fn selections(&self) -> Vec<Option<FieldId>> {
        self.state.borrow().selections.clone()
    }
}

impl FieldContext for MockContext {
    fn snapshot(&self) -> ContextSnapshot {
        let state = self.state.borrow();
        ContextSnapshot::new(state.selected_field.clone(), state.fields.clone())
    }

    fn set_selected_field(&self, field_id: Option<FieldId>) {
        let mut state = self.state.borrow_mut();
        state.selections.push(field_id.clone());
        state.selected_field = field_id;
    }

    async fn refresh_fields(&self) -> Result<(), ClientError> {
        let wait = {
            let mut state = self.state.borrow_mut();
            state.refresh_calls += 1;
            state.refresh_delay
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        let fields = self.service.fetch_fields().await?;
        self.set_fields(fields);
        Ok(())
    }
}
