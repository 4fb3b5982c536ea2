//! # Filesystem-backed token store
//!
//! [`FileStore`] is a [`TokenStore`] implementation that persists the bearer token to
//! the local filesystem. It is used on desktop and mobile platforms to keep the admin
//! signed in across app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── token          # the bearer token, UTF-8, no trailing newline
//! ```
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/portfolio/` |
//! | Linux | `~/.local/share/portfolio/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\portfolio\` |
//! | Android | App-internal storage (via `dirs`) |
//!
//! [`dirs::data_dir()`]: https://docs.rs/dirs

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::token::{TokenStore, TOKEN_KEY};

/// Filesystem-backed TokenStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn token_path(&self) -> PathBuf {
        self.base.join(TOKEN_KEY)
    }
}

impl TokenStore for FileStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(self.token_path()) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read token file: {}", e);
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Err(e) = fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create token directory: {}", e);
            return;
        }
        if let Err(e) = fs::write(self.token_path(), token) {
            tracing::warn!("Failed to write token file: {}", e);
        }
    }

    fn clear(&self) {
        match fs::remove_file(self.token_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove token file: {}", e),
        }
    }
}
