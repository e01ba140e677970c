//! Presentation rules derived from dashboard state. Everything here is pure.

use payloads::{Field, FieldId};

use crate::state::FieldCatalog;

/// Number of field cards shown in the "My Fields" preview.
pub const PREVIEW_LIMIT: usize = 3;

/// Classification of a normalized health value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Bands are inclusive at their lower bound. Anything that is not a
    /// number counts as critical.
    pub fn classify(value: f64) -> Self {
        if value >= 0.7 {
            Self::Good
        } else if value >= 0.5 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Good => "bg-green-500",
            Self::Warning => "bg-yellow-500",
            Self::Critical => "bg-red-500",
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// First non-empty of `crop`, `mainCrop` and the first entry of `crops`.
pub fn crop_label(field: &Field) -> &str {
    non_empty(field.crop.as_deref())
        .or_else(|| non_empty(field.main_crop.as_deref()))
        .or_else(|| non_empty(field.crops.first().map(String::as_str)))
        .unwrap_or("None planted")
}

pub fn field_name_label(field: &Field) -> &str {
    non_empty(field.name.as_deref()).unwrap_or("Not Selected")
}

pub fn location_label(field: &Field) -> &str {
    non_empty(field.location.as_deref()).unwrap_or("Unknown Location")
}

pub fn size_label(field: &Field) -> String {
    format!("{} acres", field.size.unwrap_or_default())
}

pub fn created_label(field: &Field) -> String {
    match field.created_at {
        Some(created_at) => created_at.strftime("%Y-%m-%d").to_string(),
        None => "N/A".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldCard<'a> {
    pub field: &'a Field,
    pub is_selected: bool,
}

/// The first few fields of the catalog, for the dashboard's field list.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPreview<'a> {
    pub cards: Vec<FieldCard<'a>>,
    pub total: usize,
}

impl CatalogPreview<'_> {
    /// Total to show on the "View all" link, when some fields are hidden.
    pub fn view_all_count(&self) -> Option<usize> {
        (self.total > PREVIEW_LIMIT).then_some(self.total)
    }
}

/// `None` for an empty catalog, in which case the section is not shown.
///
/// Only an explicit selection marks a card as selected; the positional
/// fallback used for the field summary does not.
pub fn catalog_preview<'a>(
    catalog: &'a FieldCatalog,
    selected_field: Option<&FieldId>,
) -> Option<CatalogPreview<'a>> {
    if catalog.is_empty() {
        return None;
    }

    let cards = catalog
        .fields()
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|field| FieldCard {
            field,
            is_selected: selected_field == Some(&field.id),
        })
        .collect();

    Some(CatalogPreview {
        cards,
        total: catalog.count(),
    })
}
