//! Resolution cycles: which field to show, and the field/weather fetch chain
//! behind it.
//!
//! A cycle runs in four steps:
//! 1. [`effective_field_id`] picks the field (explicit selection, else the
//!    first field of the shared list, else none).
//! 2. The loading flag goes up.
//! 3. The field is fetched, its location resolved into a
//!    [`ResolvedLocation`], and the forecast for that location fetched. With
//!    no field, only the forecast for the default location is fetched.
//! 4. Field and forecast are published together and the loading flag comes
//!    down, whether or not the fetches succeeded.
//!
//! A failed fetch ends the cycle without publishing anything, so the view
//! keeps the result of the last successful cycle.

use std::cell::Cell;

use derive_more::Display;
use payloads::{Field, FieldId, WeatherForecast};
use tracing::Instrument;

use crate::config::{DashboardConfig, StalePolicy};
use crate::context::ContextSnapshot;
use crate::error::ResolutionCycleError;
use crate::service::DataService;
use crate::state::ViewSink;
use crate::telemetry::{error_chain, log_error};

/// Monotonically increasing id of a resolution cycle, per resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub struct CycleId(pub u64);

/// The field the dashboard should display.
///
/// A non-empty explicit selection wins. Otherwise the first entry of the
/// shared list, in its given order, is used.
pub fn effective_field_id(
    selected_field: Option<&FieldId>,
    fields: &[Field],
) -> Option<FieldId> {
    selected_field
        .filter(|id| !id.is_empty())
        .or_else(|| fields.first().map(|field| &field.id))
        .filter(|id| !id.is_empty())
        .cloned()
}

/// Location the weather lookup is keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub location: String,
    /// True when the default location stands in for a missing one.
    pub is_fallback: bool,
}

impl ResolvedLocation {
    pub fn fallback(default_location: &str) -> Self {
        Self {
            location: default_location.to_string(),
            is_fallback: true,
        }
    }

    /// The field's own location when it has a non-empty one.
    pub fn for_field(field: &Field, default_location: &str) -> Self {
        match field.location.as_deref() {
            Some(location) if !location.is_empty() => Self {
                location: location.to_string(),
                is_fallback: false,
            },
            _ => Self::fallback(default_location),
        }
    }
}

/// How a resolution cycle ended. Failures are logged before this is
/// returned; none of them escape as errors.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The field and its forecast were published together.
    Published,
    /// There was no field to show. The view was cleared, with the default
    /// location's forecast if that lookup succeeded.
    NoField {
        forecast_error: Option<ResolutionCycleError>,
    },
    /// A fetch failed; nothing was published.
    Failed(ResolutionCycleError),
    /// A newer cycle started while this one was in flight and the stale
    /// policy discards late results.
    Superseded,
}

enum Fetched {
    Field(Field, WeatherForecast),
    NoField(Result<WeatherForecast, ResolutionCycleError>),
}

/// Keeps the dashboard's [`ViewState`](crate::ViewState) in step with the
/// selected field.
///
/// Call [`run_cycle`](Self::run_cycle) whenever the selected field id or the
/// shared field list changes. Cycles are never cancelled; whether a late
/// cycle may overwrite a newer one is decided by the configured
/// [`StalePolicy`].
pub struct SelectedFieldResolver<S> {
    service: S,
    config: DashboardConfig,
    latest_cycle: Cell<u64>,
}

impl<S: DataService> SelectedFieldResolver<S> {
    pub fn new(service: S, config: DashboardConfig) -> Self {
        Self {
            service,
            config,
            latest_cycle: Cell::new(0),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Id of the most recently started cycle, if any.
    pub fn latest_cycle(&self) -> Option<CycleId> {
        match self.latest_cycle.get() {
            0 => None,
            id => Some(CycleId(id)),
        }
    }

    pub async fn run_cycle(
        &self,
        context: &ContextSnapshot,
        sink: &impl ViewSink,
    ) -> CycleOutcome {
        let cycle = self.begin_cycle();
        let span = tracing::info_span!("resolution_cycle", %cycle);
        self.resolve(cycle, context, sink).instrument(span).await
    }

    fn begin_cycle(&self) -> CycleId {
        let id = self.latest_cycle.get() + 1;
        self.latest_cycle.set(id);
        CycleId(id)
    }

    fn is_superseded(&self, cycle: CycleId) -> bool {
        self.config.stale_policy == StalePolicy::DiscardSuperseded
            && self.latest_cycle() != Some(cycle)
    }

    async fn resolve(
        &self,
        cycle: CycleId,
        context: &ContextSnapshot,
        sink: &impl ViewSink,
    ) -> CycleOutcome {
        let field_id = effective_field_id(
            context.selected_field.as_ref(),
            &context.fields,
        );
        tracing::debug!(field_id = ?field_id, "Resolved effective field");

        sink.set_loading(true);

        let fetched = match field_id {
            Some(field_id) => self.fetch_field_and_forecast(&field_id).await,
            None => {
                let location =
                    ResolvedLocation::fallback(&self.config.default_location);
                Ok(Fetched::NoField(self.weather_stage(&location).await))
            }
        };

        if self.is_superseded(cycle) {
            tracing::debug!("Discarding result of superseded cycle");
            return CycleOutcome::Superseded;
        }

        let outcome = match fetched {
            Ok(Fetched::Field(field, forecast)) => {
                tracing::info!(field_id = %field.id, "Publishing field and forecast");
                sink.publish_view(Some(field), Some(forecast));
                CycleOutcome::Published
            }
            Ok(Fetched::NoField(Ok(forecast))) => {
                tracing::info!("No field available, publishing default forecast");
                sink.publish_view(None, Some(forecast));
                CycleOutcome::NoField {
                    forecast_error: None,
                }
            }
            Ok(Fetched::NoField(Err(e))) => {
                log_error(&e);
                sink.publish_view(None, None);
                CycleOutcome::NoField {
                    forecast_error: Some(e),
                }
            }
            Err(e @ ResolutionCycleError::FieldFetch { .. })
                if e.source_error().is_not_found() =>
            {
                tracing::warn!(
                    error = %error_chain(&e),
                    "Selected field no longer exists"
                );
                CycleOutcome::Failed(e)
            }
            Err(e) => {
                log_error(&e);
                CycleOutcome::Failed(e)
            }
        };

        sink.set_loading(false);
        outcome
    }

    /// The dependent chain: the weather lookup needs the fetched field's
    /// location, so it cannot start before the field fetch completes.
    async fn fetch_field_and_forecast(
        &self,
        field_id: &FieldId,
    ) -> Result<Fetched, ResolutionCycleError> {
        let (field, location) = self.field_stage(field_id).await?;
        let forecast = self.weather_stage(&location).await?;
        Ok(Fetched::Field(field, forecast))
    }

    async fn field_stage(
        &self,
        field_id: &FieldId,
    ) -> Result<(Field, ResolvedLocation), ResolutionCycleError> {
        let field = self
            .service
            .fetch_field_data(field_id)
            .await
            .map_err(|source| ResolutionCycleError::FieldFetch {
                field_id: field_id.clone(),
                source,
            })?;
        let location =
            ResolvedLocation::for_field(&field, &self.config.default_location);
        tracing::debug!(
            location = %location.location,
            is_fallback = location.is_fallback,
            "Resolved field location"
        );
        Ok((field, location))
    }

    async fn weather_stage(
        &self,
        location: &ResolvedLocation,
    ) -> Result<WeatherForecast, ResolutionCycleError> {
        self.service
            .fetch_weather_forecast(&location.location)
            .await
            .map_err(|source| ResolutionCycleError::WeatherFetch {
                location: location.location.clone(),
                source,
            })
    }
}
