pub mod api_client;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use responses::{Field, WeatherForecast};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifier of a field tracked by the backend.
///
/// The backend is not consistent about id encoding, so both JSON strings and
/// JSON integers deserialize into the same value (`1` and `"1"` are equal).
/// Ids always serialize as strings.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize,
    Deserialize,
)]
#[serde(from = "RawFieldId")]
pub struct FieldId(pub String);

impl FieldId {
    /// An empty id is how the shared context spells "nothing selected".
    /// Whitespace is a real (if odd) id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i32> for FieldId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for FieldId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldId {
    Text(String),
    Number(i64),
}

impl From<RawFieldId> for FieldId {
    fn from(raw: RawFieldId) -> Self {
        match raw {
            RawFieldId::Text(id) => Self(id),
            RawFieldId::Number(id) => Self(id.to_string()),
        }
    }
}
