//! Test doubles for the dashboard's collaborators.
//!
//! [`TestDashboard`] wires a scripted [`MockDataService`] and [`MockContext`]
//! to a real resolver and catalog loader, publishing into a
//! [`RecordingSink`] so tests can inspect both the final state and the order
//! in which it was published.

pub mod context;
pub mod logs;
pub mod mock;
pub mod service;
pub mod sink;

pub use context::MockContext;
pub use logs::{LogCapture, capture_logs, init_test_tracing};
pub use service::{Call, MockDataService, forecast_for};
pub use sink::{RecordingSink, SinkEvent};

use dashboard::{
    CatalogLoad, CycleOutcome, DashboardConfig, FieldCatalogLoader,
    FieldContext, RefreshError, SelectedFieldResolver, Timer,
    manual_refresh,
};
use payloads::Field;
use std::time::Duration;

/// Sleeps on tokio's clock, so `start_paused` tests control it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct TestDashboard {
    pub service: MockDataService,
    pub context: MockContext,
    pub sink: RecordingSink,
    pub resolver: SelectedFieldResolver<MockDataService>,
    pub loader: FieldCatalogLoader<MockDataService>,
    pub timer: TokioTimer,
}

impl TestDashboard {
    /// A dashboard whose backend catalog and shared field list both hold
    /// `fields`, with nothing selected.
    pub fn new(fields: Vec<Field>) -> Self {
        Self::with_config(fields, DashboardConfig::default())
    }

    pub fn with_config(fields: Vec<Field>, config: DashboardConfig) -> Self {
        init_test_tracing();

        let service = MockDataService::new(fields.clone());
        let context = MockContext::new(service.clone(), fields);

        Self {
            resolver: SelectedFieldResolver::new(service.clone(), config),
            loader: FieldCatalogLoader::new(service.clone()),
            service,
            context,
            sink: RecordingSink::default(),
            timer: TokioTimer,
        }
    }

    /// Run a resolution cycle against the context as it is now.
    pub async fn run_cycle(&self) -> CycleOutcome {
        self.resolver
            .run_cycle(&self.context.snapshot(), &self.sink)
            .await
    }

    pub async fn activate_catalog(&self) -> CatalogLoad {
        self.loader.activate(&self.sink).await
    }

    pub async fn refresh(&self) -> Result<(), RefreshError> {
        manual_refresh(
            &self.context,
            &self.timer,
            &self.sink,
            self.resolver.config().min_refresh_spinner,
        )
        .await
    }
}
