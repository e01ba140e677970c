use payloads::{ClientError, FieldId};

/// The catalog could not be loaded. The previous catalog stays published.
#[derive(Debug, thiserror::Error)]
#[error("Error loading all fields")]
pub struct CatalogFetchError(#[from] pub ClientError);

/// One of the dependent fetches of a resolution cycle failed.
///
/// The cycle publishes nothing when this happens, so the view keeps whatever
/// the last successful cycle put there.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionCycleError {
    #[error("Error loading data for field {field_id}")]
    FieldFetch {
        field_id: FieldId,
        #[source]
        source: ClientError,
    },
    #[error("Error loading weather forecast for {location:?}")]
    WeatherFetch {
        location: String,
        #[source]
        source: ClientError,
    },
}

impl ResolutionCycleError {
    pub fn source_error(&self) -> &ClientError {
        match self {
            Self::FieldFetch { source, .. } => source,
            Self::WeatherFetch { source, .. } => source,
        }
    }
}

/// The shared context failed to refresh its field list.
#[derive(Debug, thiserror::Error)]
#[error("Error refreshing fields")]
pub struct RefreshError(#[from] pub ClientError);
