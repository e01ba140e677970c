use jiff::Timestamp;
use payloads::{Field, WeatherForecast};
use std::cell::RefCell;
use std::rc::Rc;

/// What the dashboard view renders from.
///
/// `resolved_field` and `forecast` only ever change together, through
/// [`ViewState::publish`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub resolved_field: Option<Field>,
    pub forecast: Option<WeatherForecast>,
    pub is_loading: bool,
    /// When field and forecast were last published.
    pub updated_at: Option<Timestamp>,
}

impl Default for ViewState {
    /// The view starts out loading: nothing is shown until the first cycle
    /// finishes.
    fn default() -> Self {
        Self {
            resolved_field: None,
            forecast: None,
            is_loading: true,
            updated_at: None,
        }
    }
}

impl ViewState {
    pub fn publish(
        &mut self,
        resolved_field: Option<Field>,
        forecast: Option<WeatherForecast>,
    ) {
        self.resolved_field = resolved_field;
        self.forecast = forecast;
        self.updated_at = Some(Timestamp::now());
    }

    /// Message shown in place of the field summary, if there is no field.
    pub fn empty_message(&self) -> Option<&'static str> {
        match self.resolved_field {
            Some(_) => None,
            None => Some("No field selected or no fields available"),
        }
    }
}

/// The complete field catalog as of the last successful load.
///
/// The count is always derived from the stored fields, so it cannot drift
/// from the sequence it describes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCatalog {
    fields: Vec<Field>,
}

impl FieldCatalog {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Where resolution cycles and refreshes publish view updates.
pub trait ViewSink {
    fn set_loading(&self, is_loading: bool);

    /// Replace field and forecast in one step.
    fn publish_view(
        &self,
        resolved_field: Option<Field>,
        forecast: Option<WeatherForecast>,
    );
}

/// Where the catalog loader publishes a freshly loaded catalog.
pub trait CatalogSink {
    fn publish_catalog(&self, fields: Vec<Field>);
}

#[derive(Debug, Default)]
struct DashboardState {
    view: ViewState,
    catalog: FieldCatalog,
}

/// Single-threaded shared dashboard state, for hosts without a UI framework
/// of their own.
#[derive(Debug, Clone, Default)]
pub struct SharedDashboardState {
    inner: Rc<RefCell<DashboardState>>,
}

impl SharedDashboardState {
    pub fn view(&self) -> ViewState {
        self.inner.borrow().view.clone()
    }

    pub fn catalog(&self) -> FieldCatalog {
        self.inner.borrow().catalog.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().view.is_loading
    }
}

impl ViewSink for SharedDashboardState {
    fn set_loading(&self, is_loading: bool) {
        self.inner.borrow_mut().view.is_loading = is_loading;
    }

    fn publish_view(
        &self,
        resolved_field: Option<Field>,
        forecast: Option<WeatherForecast>,
    ) {
        self.inner
            .borrow_mut()
            .view
            .publish(resolved_field, forecast);
    }
}

impl CatalogSink for SharedDashboardState {
    fn publish_catalog(&self, fields: Vec<Field>) {
        self.inner.borrow_mut().catalog = FieldCatalog::new(fields);
    }
}
