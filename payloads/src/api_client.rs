use crate::{Field, FieldId, WeatherForecast};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn query_get(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Get every field in the catalog, in server order.
    pub async fn fields(&self) -> Result<Vec<Field>, ClientError> {
        let response = self.empty_get("fields").await?;
        ok_body(response).await
    }

    /// Get the details of a single field.
    pub async fn field(&self, field_id: &FieldId) -> Result<Field, ClientError> {
        let response = self.empty_get(&format!("fields/{field_id}")).await?;
        ok_body(response).await
    }

    /// Get the weather forecast for a free-form location string.
    pub async fn weather_forecast(
        &self,
        location: &str,
    ) -> Result<WeatherForecast, ClientError> {
        let response =
            self.query_get("weather", &[("location", location)]).await?;
        let data = ok_body(response).await?;
        Ok(WeatherForecast::new(location, data))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::APIError(StatusCode::NOT_FOUND, _))
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}
