//! Credential token persistence for the portfolio client.
//!
//! | Module | Platform | Store |
//! |--------|----------|-------|
//! | [`memory`] | any | [`MemoryStore`], process-local slot for tests and fallback |
//! | [`file_store`] | native | [`FileStore`], one file under the platform data directory |
//! | `local_storage` | wasm + `web` | `LocalStorageStore`, the browser's `localStorage` |

pub mod token;

pub mod file_store;
pub mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use token::{TokenStore, TOKEN_KEY};
