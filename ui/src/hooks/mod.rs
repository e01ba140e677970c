pub mod use_dashboard;
pub mod use_field_catalog;
pub mod use_shared_fields;

pub use use_dashboard::{DashboardHookReturn, use_dashboard};
pub use use_field_catalog::use_field_catalog;
pub use use_shared_fields::use_shared_fields;

/// Distinguishes "not fetched yet" from "fetched and empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Fetched(data) => Some(data),
            Self::NotFetched => None,
        }
    }
}
