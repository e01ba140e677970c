use payloads::{APIClient, ClientError, Field, FieldId, WeatherForecast};
use std::future::Future;

/// Data access the dashboard depends on.
///
/// Futures are not required to be `Send`: everything runs on one cooperative
/// task queue, in the browser or on a current-thread runtime.
pub trait DataService {
    fn fetch_fields(
        &self,
    ) -> impl Future<Output = Result<Vec<Field>, ClientError>>;

    fn fetch_field_data(
        &self,
        field_id: &FieldId,
    ) -> impl Future<Output = Result<Field, ClientError>>;

    fn fetch_weather_forecast(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<WeatherForecast, ClientError>>;
}

impl DataService for APIClient {
    async fn fetch_fields(&self) -> Result<Vec<Field>, ClientError> {
        self.fields().await
    }

    async fn fetch_field_data(
        &self,
        field_id: &FieldId,
    ) -> Result<Field, ClientError> {
        self.field(field_id).await
    }

    async fn fetch_weather_forecast(
        &self,
        location: &str,
    ) -> Result<WeatherForecast, ClientError> {
        self.weather_forecast(location).await
    }
}
