use dashboard::{
    CatalogSink, FieldCatalog, SharedDashboardState, ViewSink, ViewState,
};
use payloads::{Field, FieldId, WeatherForecast};
use std::cell::RefCell;
use std::rc::Rc;

/// One call made on the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Loading(bool),
    /// Field id and forecast location that were published together.
    View {
        field: Option<FieldId>,
        forecast: Option<String>,
    },
    Catalog(usize),
}

/// A [`SharedDashboardState`] that also remembers every call made on it.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub state: SharedDashboardState,
    events: Rc<RefCell<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn view(&self) -> ViewState {
        self.state.view()
    }

    pub fn catalog(&self) -> FieldCatalog {
        self.state.catalog()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    fn record(&self, event: SinkEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl ViewSink for RecordingSink {
    fn set_loading(&self, is_loading: bool) {
        self.record(SinkEvent::Loading(is_loading));
        self.state.set_loading(is_loading);
    }

    fn publish_view(
        &self,
        resolved_field: Option<Field>,
        forecast: Option<WeatherForecast>,
    ) {
        self.record(SinkEvent::View {
            field: resolved_field.as_ref().map(|field| field.id.clone()),
            forecast: forecast.as_ref().map(|f| f.location.clone()),
        });
        self.state.publish_view(resolved_field, forecast);
    }
}

impl CatalogSink for RecordingSink {
    fn publish_catalog(&self, fields: Vec<Field>) {
        self.record(SinkEvent::Catalog(fields.len()));
        self.state.publish_catalog(fields);
    }
}
