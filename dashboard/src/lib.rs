//! Data orchestration behind the farm dashboard view.
//!
//! Two routines keep the view in sync with the backend:
//! - [`FieldCatalogLoader`] loads the full field catalog once per activation.
//! - [`SelectedFieldResolver`] runs a resolution cycle whenever the selected
//!   field or the shared field list changes: it picks the effective field,
//!   fetches its details, then the weather for its location, and publishes
//!   both at once.
//!
//! Nothing here knows about a runtime or a browser. Data access, the shared
//! selection context, timers and the published state are all traits, so the
//! same code drives the Yew front end and the tokio-based tests.

pub mod catalog;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod refresh;
pub mod resolver;
pub mod service;
pub mod state;
pub mod telemetry;
pub mod timer;

pub use catalog::{CatalogLoad, FieldCatalogLoader};
pub use config::{DashboardConfig, StalePolicy};
pub use context::{ContextSnapshot, FieldContext, select_field};
pub use error::{CatalogFetchError, RefreshError, ResolutionCycleError};
pub use refresh::manual_refresh;
pub use resolver::{
    CycleId, CycleOutcome, ResolvedLocation, SelectedFieldResolver,
    effective_field_id,
};
pub use service::DataService;
pub use state::{
    CatalogSink, FieldCatalog, SharedDashboardState, ViewSink, ViewState,
};
pub use telemetry::{error_chain, log_error};
pub use timer::Timer;
