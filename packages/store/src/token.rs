//! # Credential token persistence
//!
//! The portfolio client keeps exactly one piece of durable state: the bearer token
//! returned by the login and register endpoints. [`TokenStore`] abstracts over where
//! that string lives so the session logic works the same against an in-memory slot
//! (tests), a file in the platform data directory (desktop/mobile), or the browser's
//! `localStorage` (web).
//!
//! Implementations are synchronous because the browser storage API is. Failures are
//! logged and swallowed: an unreadable store degrades to "no token", which the
//! session layer already treats as logged out.

/// Well-known storage key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Persistent slot for the session's bearer token.
///
/// A stored token says nothing about its validity; the session layer only trusts
/// it after a successful auth check or login response.
pub trait TokenStore {
    /// Read the persisted token, if any.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    fn save(&self, token: &str);

    /// Remove the persisted token. Clearing an empty store is a no-op.
    fn clear(&self);

    /// Whether a token is currently persisted.
    fn has_token(&self) -> bool {
        self.load().is_some()
    }
}

impl<S: TokenStore + ?Sized> TokenStore for std::rc::Rc<S> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, token: &str) {
        (**self).save(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

impl<S: TokenStore + ?Sized> TokenStore for std::sync::Arc<S> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, token: &str) {
        (**self).save(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
