//! Shared constructors for all platforms.
//!
//! Picks the token store and client configuration for the current target:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Desktop / Mobile** (native): `<data_dir>/portfolio/token` via [`store::FileStore`]

use api::{ApiClient, ApiError, ClientConfig, HttpTransport};

use crate::admin::{BlogManager, ProjectManager};
use crate::session::SessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformTokenStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformTokenStore = store::FileStore;

pub type AppApi = ApiClient<HttpTransport>;
pub type AppSession = SessionStore<HttpTransport, PlatformTokenStore>;
pub type AppBlogManager = BlogManager<HttpTransport, PlatformTokenStore>;
pub type AppProjectManager = ProjectManager<HttpTransport, PlatformTokenStore>;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
fn data_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("portfolio")
}

/// Create the platform-appropriate token store.
pub fn make_token_store() -> PlatformTokenStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::FileStore::new(data_dir())
    }
}

/// Client configuration for this platform.
///
/// Native targets read `<data_dir>/portfolio/config.toml` when present; otherwise
/// (and always on the web) the environment decides.
pub fn make_config() -> ClientConfig {
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let path = data_dir().join("config.toml");
        if let Ok(text) = std::fs::read_to_string(&path) {
            match ClientConfig::from_toml(&text) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring {}: {}", path.display(), e),
            }
        }
    }
    ClientConfig::from_env()
}

/// Create the HTTP-backed API client from this platform's configuration.
pub fn make_api() -> Result<AppApi, ApiError> {
    api_for(&make_config())
}

fn api_for(config: &ClientConfig) -> Result<AppApi, ApiError> {
    ApiClient::from_config(config).map_err(|e| {
        tracing::error!("Failed to create the HTTP client: {}", e);
        e
    })
}

/// Ask the user a yes/no question.
///
/// Native builds have no blocking dialog here and always decline.
pub fn confirm(prompt: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("No confirmation dialog available, declining: {}", prompt);
        false
    }
}

/// Send the browser to `path`. Returns `false` when there is no browser location.
pub fn redirect(path: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .map(|window| window.location().set_href(path).is_ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("No browser location to redirect to {}", path);
        false
    }
}
