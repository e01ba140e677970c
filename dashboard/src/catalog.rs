use std::cell::Cell;

use crate::error::CatalogFetchError;
use crate::service::DataService;
use crate::state::CatalogSink;
use crate::telemetry::log_error;

/// Result of [`FieldCatalogLoader::activate`].
#[derive(Debug)]
pub enum CatalogLoad {
    /// The catalog was published with this many fields.
    Loaded(usize),
    /// The fetch failed and was logged; the previous catalog stays.
    Failed(CatalogFetchError),
    /// This loader already ran; no fetch was issued.
    AlreadyActivated,
}

/// Loads the full field catalog once per activation.
///
/// There is no retry and no cancellation. A failed load leaves whatever was
/// published before (an empty catalog on the first load).
pub struct FieldCatalogLoader<S> {
    service: S,
    activated: Cell<bool>,
}

impl<S: DataService> FieldCatalogLoader<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            activated: Cell::new(false),
        }
    }

    pub fn is_activated(&self) -> bool {
        self.activated.get()
    }

    pub async fn activate(&self, sink: &impl CatalogSink) -> CatalogLoad {
        if self.activated.replace(true) {
            tracing::debug!("Field catalog loader already activated");
            return CatalogLoad::AlreadyActivated;
        }

        match self.service.fetch_fields().await {
            Ok(fields) => {
                let count = fields.len();
                tracing::info!(count, "Loaded field catalog");
                sink.publish_catalog(fields);
                CatalogLoad::Loaded(count)
            }
            Err(e) => {
                let e = CatalogFetchError::from(e);
                log_error(&e);
                CatalogLoad::Failed(e)
            }
        }
    }
}
