use dashboard::DataService;
use payloads::{ClientError, Field, FieldId, WeatherForecast};
use reqwest::StatusCode;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

/// A request made against the mock backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fields,
    FieldData(FieldId),
    Weather(String),
}

#[derive(Default)]
struct ServiceState {
    catalog: Vec<Field>,
    fail_catalog: bool,
    failing_fields: HashSet<FieldId>,
    failing_locations: HashSet<String>,
    catalog_delay: Duration,
    field_delays: HashMap<FieldId, Duration>,
    weather_delay: Duration,
    calls: Vec<Call>,
}

/// Scripted backend. Clones share state, so a test can keep a handle while
/// the resolver owns another.
#[derive(Clone, Default)]
pub struct MockDataService {
    state: Rc<RefCell<ServiceState>>,
}

/// The forecast the mock returns for `location`.
pub fn forecast_for(location: &str) -> WeatherForecast {
    let mut data = serde_json::Map::new();
    data.insert(
        "summary".to_string(),
        format!("Clear skies over {location}").into(),
    );
    data.insert("high_celsius".to_string(), 24.into());
    WeatherForecast::new(location, data)
}

async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

impl MockDataService {
    pub fn new(catalog: Vec<Field>) -> Self {
        let service = Self::default();
        service.set_catalog(catalog);
        service
    }

    /// Replace what the backend holds. Field details are served from the
    /// same list.
    pub fn set_catalog(&self, catalog: Vec<Field>) {
        self.state.borrow_mut().catalog = catalog;
    }

    pub fn fail_catalog(&self, fail: bool) {
        self.state.borrow_mut().fail_catalog = fail;
    }

    pub fn fail_field(&self, field_id: impl Into<FieldId>) {
        self.state.borrow_mut().failing_fields.insert(field_id.into());
    }

    pub fn fail_weather(&self, location: &str) {
        self.state
            .borrow_mut()
            .failing_locations
            .insert(location.to_string());
    }

    /// Stop failing everything that was set up to fail.
    pub fn heal(&self) {
        let mut state = self.state.borrow_mut();
        state.fail_catalog = false;
        state.failing_fields.clear();
        state.failing_locations.clear();
    }

    pub fn delay_catalog(&self, duration: Duration) {
        self.state.borrow_mut().catalog_delay = duration;
    }

    pub fn delay_field(&self, field_id: impl Into<FieldId>, duration: Duration) {
        self.state
            .borrow_mut()
            .field_delays
            .insert(field_id.into(), duration);
    }

    pub fn delay_weather(&self, duration: Duration) {
        self.state.borrow_mut().weather_delay = duration;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn catalog_requests(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Fields))
            .count()
    }

    pub fn field_requests(&self) -> Vec<FieldId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::FieldData(field_id) => Some(field_id),
                _ => None,
            })
            .collect()
    }

    pub fn weather_requests(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Weather(location) => Some(location),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }
}

impl DataService for MockDataService {
    async fn fetch_fields(&self) -> Result<Vec<Field>, ClientError> {
        let (wait, fail) = {
            let mut state = self.state.borrow_mut();
            state.calls.push(Call::Fields);
            (state.catalog_delay, state.fail_catalog)
        };
        delay(wait).await;

        if fail {
            return Err(ClientError::APIError(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ));
        }
        Ok(self.state.borrow().catalog.clone())
    }

    async fn fetch_field_data(
        &self,
        field_id: &FieldId,
    ) -> Result<Field, ClientError> {
        let (wait, fail) = {
            let mut state = self.state.borrow_mut();
            state.calls.push(Call::FieldData(field_id.clone()));
            (
                state.field_delays.get(field_id).copied().unwrap_or_default(),
                state.failing_fields.contains(field_id),
            )
        };
        delay(wait).await;

        if fail {
            return Err(ClientError::APIError(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ));
        }
        self.state
            .borrow()
            .catalog
            .iter()
            .find(|field| &field.id == field_id)
            .cloned()
            .ok_or_else(|| {
                ClientError::APIError(
                    StatusCode::NOT_FOUND,
                    "Field not found".to_string(),
                )
            })
    }

    async fn fetch_weather_forecast(
        &self,
        location: &str,
    ) -> Result<WeatherForecast, ClientError> {
        let (wait, fail) = {
            let mut state = self.state.borrow_mut();
            state.calls.push(Call::Weather(location.to_string()));
            (
                state.weather_delay,
                state.failing_locations.contains(location),
            )
        };
        delay(wait).await;

        if fail {
            return Err(ClientError::APIError(
                StatusCode::SERVICE_UNAVAILABLE,
                "Weather service unavailable".to_string(),
            ));
        }
        Ok(forecast_for(location))
    }
}
