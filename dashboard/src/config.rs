use anyhow::{Context, bail};
use std::time::Duration;

/// Location used for the weather lookup when there is no field, or the field
/// has no location of its own.
pub const DEFAULT_LOCATION: &str = "Default Location";

/// Minimum time the spinner stays up after a manual refresh.
pub const DEFAULT_REFRESH_SPINNER: Duration = Duration::from_millis(500);

/// What to do with the result of a resolution cycle that finishes after a
/// newer cycle has already started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Publish it anyway. A slow older cycle can overwrite a newer result.
    #[default]
    Overwrite,
    /// Drop it, leaving the view and the loading flag to the newest cycle.
    DiscardSuperseded,
}

impl std::str::FromStr for StalePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "overwrite" => Ok(Self::Overwrite),
            "discard-superseded" => Ok(Self::DiscardSuperseded),
            other => bail!(
                "unknown stale policy {other:?}, expected \"overwrite\" or \
                 \"discard-superseded\""
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub default_location: String,
    pub min_refresh_spinner: Duration,
    pub stale_policy: StalePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            min_refresh_spinner: DEFAULT_REFRESH_SPINNER,
            stale_policy: StalePolicy::default(),
        }
    }
}

pub const DEFAULT_LOCATION_VAR: &str = "DASHBOARD_DEFAULT_LOCATION";
pub const REFRESH_SPINNER_VAR: &str = "DASHBOARD_REFRESH_SPINNER_MS";
pub const STALE_POLICY_VAR: &str = "DASHBOARD_STALE_POLICY";

/// Dashboard variables as they were set when this crate was compiled. The
/// browser has no process environment, so this is the only way to tune a
/// wasm build.
pub fn build_time_var(name: &str) -> Option<String> {
    let value = match name {
        DEFAULT_LOCATION_VAR => option_env!("DASHBOARD_DEFAULT_LOCATION"),
        REFRESH_SPINNER_VAR => option_env!("DASHBOARD_REFRESH_SPINNER_MS"),
        STALE_POLICY_VAR => option_env!("DASHBOARD_STALE_POLICY"),
        _ => None,
    };
    value.map(str::to_string)
}

impl DashboardConfig {
    /// Overrides baked in at build time. Unset variables keep their
    /// defaults.
    ///
    /// - DASHBOARD_DEFAULT_LOCATION: fallback weather location
    /// - DASHBOARD_REFRESH_SPINNER_MS: minimum spinner time after a refresh
    /// - DASHBOARD_STALE_POLICY: "overwrite" or "discard-superseded"
    pub fn from_build_env() -> anyhow::Result<Self> {
        Self::from_lookup(build_time_var)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(location) = lookup(DEFAULT_LOCATION_VAR) {
            if location.trim().is_empty() {
                bail!("{DEFAULT_LOCATION_VAR} must not be empty");
            }
            config.default_location = location;
        }

        if let Some(ms) = lookup(REFRESH_SPINNER_VAR) {
            let ms = ms
                .trim()
                .parse::<u64>()
                .with_context(|| {
                    format!("{REFRESH_SPINNER_VAR} must be milliseconds")
                })?;
            config.min_refresh_spinner = Duration::from_millis(ms);
        }

        if let Some(policy) = lookup(STALE_POLICY_VAR) {
            config.stale_policy = policy
                .parse()
                .with_context(|| format!("invalid {STALE_POLICY_VAR}"))?;
        }

        Ok(config)
    }
}
