use crate::FieldId;
use jiff::{Timestamp, civil, tz::TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// A unit of farmland as returned by the field catalog service.
///
/// Only `id` is guaranteed. The backend has carried the planted crop under
/// three different keys over time (`crop`, `mainCrop`, `crops`), so all of
/// them are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Size in acres.
    #[serde(default)]
    pub size: Option<Decimal>,
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub main_crop: Option<String>,
    #[serde(default)]
    pub crops: Vec<String>,
    /// Unreadable values are dropped rather than failing the whole record.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl Field {
    pub fn new(id: impl Into<FieldId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            location: None,
            size: None,
            crop: None,
            main_crop: None,
            crops: Vec::new(),
            created_at: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    EpochMillis(i64),
    Other(IgnoredAny),
}

/// Accepts RFC 3339 timestamps, offset-free date-times and bare dates (both
/// taken as UTC), and epoch milliseconds.
fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(text)) => parse_timestamp(text.trim()),
        Some(RawTimestamp::EpochMillis(ms)) => {
            Timestamp::from_millisecond(ms).ok()
        }
        Some(RawTimestamp::Other(_)) | None => None,
    })
}

fn parse_timestamp(text: &str) -> Option<Timestamp> {
    if let Ok(timestamp) = text.parse::<Timestamp>() {
        return Some(timestamp);
    }
    let datetime = text
        .parse::<civil::DateTime>()
        .or_else(|_| {
            text.parse::<civil::Date>()
                .map(|date| date.to_datetime(civil::Time::midnight()))
        })
        .ok()?;
    datetime
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Weather forecast for a location.
///
/// The body of the weather endpoint is treated as opaque; the client stamps
/// the location it asked for onto the record since that is its only key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub location: String,
    #[serde(flatten)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl WeatherForecast {
    pub fn new(
        location: impl Into<String>,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            location: location.into(),
            data,
        }
    }
}
