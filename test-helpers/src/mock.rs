//! Sample farm data shared by the dashboard tests.

use jiff::Timestamp;
use payloads::{Field, FieldId};
use rust_decimal::Decimal;

/// A field with just a name and location.
pub fn field(id: impl Into<FieldId>, name: &str, location: &str) -> Field {
    Field {
        name: Some(name.to_string()),
        location: Some(location.to_string()),
        ..Field::new(id)
    }
}

/// Four fields in server order, exercising each of the crop keys and one
/// field without a location.
pub fn sample_fields() -> Vec<Field> {
    let created_at: Timestamp = "2024-02-15T08:30:00Z"
        .parse()
        .expect("valid timestamp literal");

    vec![
        Field {
            size: Some(Decimal::new(42, 0)),
            crop: Some("Corn".to_string()),
            created_at: Some(created_at),
            ..field(1, "North", "Fresno, CA")
        },
        Field {
            size: Some(Decimal::new(185, 1)),
            main_crop: Some("Wheat".to_string()),
            created_at: Some(created_at),
            ..field(2, "South", "Modesto, CA")
        },
        Field {
            size: Some(Decimal::new(7, 0)),
            crops: vec!["Soy".to_string(), "Oats".to_string()],
            ..field(3, "Creek Bottom", "Merced, CA")
        },
        Field {
            name: Some("Back Forty".to_string()),
            ..Field::new(4)
        },
    ]
}
