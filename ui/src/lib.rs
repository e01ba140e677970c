use dashboard::DashboardConfig;
use payloads::APIClient;
use yew::prelude::*;

pub mod context;
pub mod hooks;
pub mod logs;
mod pages;
pub mod state;

pub use state::State;

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            // Fallback to same origin
            web_sys::window()
                .and_then(|window| window.location().origin().ok())
                .unwrap_or_default()
        });

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

/// Dashboard settings baked in at build time. An invalid override is logged
/// and the defaults are used instead.
pub fn get_dashboard_config() -> DashboardConfig {
    DashboardConfig::from_build_env().unwrap_or_else(|e| {
        tracing::error!("{e:#}");
        DashboardConfig::default()
    })
}

#[function_component]
pub fn App() -> Html {
    html! {
        <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <pages::DashboardPage />
            </main>
        </div>
    }
}
