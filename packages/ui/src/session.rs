//! # Session store
//!
//! [`SessionStore`] owns the process's one authentication state and the lifecycle of
//! the persisted bearer token. It is an ordinary value: the app builds one and hands
//! it to whoever needs it (the Dioxus provider puts it in context), so tests can run
//! several side by side.
//!
//! ## States
//!
//! | From | To | Trigger |
//! |------|----|---------|
//! | Initializing | Authenticated / Unauthenticated | [`initialize`](SessionStore::initialize), exactly once |
//! | Unauthenticated | Authenticated | successful [`login`](SessionStore::login) / [`register`](SessionStore::register) |
//! | Authenticated | Unauthenticated | [`logout`](SessionStore::logout), or a failed [`revalidate`](SessionStore::revalidate) |
//!
//! There is no automatic refresh. An expired token is only noticed when some call
//! fails with a 401, and that call reports its own error.
//!
//! ## Auth check failures
//!
//! A 401 from the current-user check deletes the token. Any other failure (timeout,
//! server down) leaves the token in place for the next launch but still treats this
//! session as signed out.
//!
//! ## Logout during a request
//!
//! [`logout`](SessionStore::logout) is synchronous and does not wait for in-flight
//! checks or logins. Each logout starts a new epoch; a check or login that began in an
//! earlier epoch is discarded when it settles, so it can never sign the session back
//! in or persist a token after the admin logged out.
//!
//! Observers either poll [`state`](SessionStore::state) or hold a
//! [`subscribe`](SessionStore::subscribe) receiver.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use api::models::{AuthPayload, AuthResponse};
use api::{ApiClient, ApiError, LoginData, RegisterData, Transport, User};
use store::TokenStore;
use thiserror::Error;
use tokio::sync::{watch, Mutex};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the startup check has settled.
    pub initializing: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            initializing: true,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn status(&self) -> SessionStatus {
        match (self.initializing, &self.user) {
            (true, _) => SessionStatus::Initializing,
            (false, Some(_)) => SessionStatus::Authenticated,
            (false, None) => SessionStatus::Unauthenticated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Unauthenticated,
    Authenticated,
}

/// Why a login or register attempt failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The server answered but did not accept the credentials.
    #[error("{0}")]
    Rejected(String),
    /// `logout` ran while the request was in flight; its result was dropped.
    #[error("signed out before the request completed")]
    SignedOut,
}

impl SessionError {
    /// Short message suitable for a login form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::SignedOut => "Signed out".to_string(),
            Self::Api(e) if e.is_unauthorized() => "Invalid credentials".to_string(),
            Self::Api(ApiError::Transport(_)) => "Could not reach the server".to_string(),
            Self::Api(_) => "Login failed".to_string(),
        }
    }
}

/// Process-wide authentication state over an API client and a token store.
pub struct SessionStore<T, S> {
    api: ApiClient<T>,
    tokens: S,
    state: watch::Sender<AuthState>,
    initialized: AtomicBool,
    /// Bumped by every logout.
    epoch: AtomicU64,
    ops: Mutex<()>,
}

impl<T: Transport, S: TokenStore> SessionStore<T, S> {
    pub fn new(api: ApiClient<T>, tokens: S) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            api,
            tokens,
            state,
            initialized: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            ops: Mutex::new(()),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// The persisted token, for callers attaching bearer headers.
    pub fn token(&self) -> Option<String> {
        self.tokens.load()
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// Resolve the startup state from the persisted token. Runs at most once.
    pub async fn initialize(&self) {
        let _guard = self.ops.lock().await;
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("Session already initialized");
            return;
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let user = match self.tokens.load() {
            Some(token) => {
                tracing::debug!("Auth check - token exists");
                self.check_token(&token).await
            }
            None => {
                tracing::debug!("Auth check - no token");
                None
            }
        };
        let user = user.filter(|_| self.still_in(epoch));

        self.state.send_replace(AuthState {
            user,
            initializing: false,
        });
        tracing::info!("Session initialized: {:?}", self.state.borrow().status());
    }

    /// Re-check the persisted token against the server.
    ///
    /// Only runs when a caller asks; failure signs the session out.
    pub async fn revalidate(&self) {
        let _guard = self.ops.lock().await;
        let epoch = self.epoch.load(Ordering::SeqCst);
        let user = match self.tokens.load() {
            Some(token) => self.check_token(&token).await,
            None => None,
        };
        if !self.still_in(epoch) {
            tracing::debug!("Logged out during revalidation; result dropped");
            return;
        }
        self.state.send_modify(|state| state.user = user);
    }

    /// Sign in with email and password. On success the token is persisted.
    pub async fn login(&self, credentials: &LoginData) -> Result<User, SessionError> {
        let _guard = self.ops.lock().await;
        tracing::debug!("Attempting login");
        let epoch = self.epoch.load(Ordering::SeqCst);
        let response = self.api.login(credentials).await.map_err(|e| {
            tracing::warn!("Login failed: {}", e);
            SessionError::from(e)
        })?;
        self.adopt(response, epoch, "Login failed")
    }

    /// Create an account and sign in with it.
    pub async fn register(&self, data: &RegisterData) -> Result<User, SessionError> {
        let _guard = self.ops.lock().await;
        let epoch = self.epoch.load(Ordering::SeqCst);
        let response = self.api.register(data).await.map_err(|e| {
            tracing::warn!("Registration failed: {}", e);
            SessionError::from(e)
        })?;
        self.adopt(response, epoch, "Registration failed")
    }

    /// Forget the token and the user. Never fails.
    pub fn logout(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.tokens.clear();
        self.state.send_modify(|state| state.user = None);
        tracing::info!("Logged out");
    }

    async fn check_token(&self, token: &str) -> Option<User> {
        match self.api.current_user(token).await {
            Ok(response) => {
                tracing::debug!("Auth check successful");
                Some(response.data.user)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Stored token rejected; clearing it");
                self.tokens.clear();
                None
            }
            Err(e) => {
                tracing::error!("Auth check failed: {}", e);
                None
            }
        }
    }

    fn still_in(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn adopt(
        &self,
        response: AuthResponse,
        epoch: u64,
        fallback: &str,
    ) -> Result<User, SessionError> {
        let AuthResponse {
            success,
            data,
            message,
        } = response;
        let Some(AuthPayload { user, token }) = data.filter(|_| success) else {
            let message = message.unwrap_or_else(|| fallback.to_string());
            tracing::warn!("{}", message);
            return Err(SessionError::Rejected(message));
        };

        if !self.still_in(epoch) {
            tracing::warn!("Logged out before sign-in completed; token discarded");
            return Err(SessionError::SignedOut);
        }

        // Signing in settles startup too; a later initialize must not re-check.
        self.initialized.store(true, Ordering::SeqCst);
        self.tokens.save(&token);
        self.state.send_replace(AuthState {
            user: Some(user.clone()),
            initializing: false,
        });
        tracing::info!("Signed in as {}", user.display_name());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::mock::MockTransport;
    use api::{Method, TransportError};
    use serde_json::json;
    use std::sync::Arc;
    use store::MemoryStore;
    use tokio::sync::Notify;

    /// Holds every request until the test opens the gate.
    struct GatedTransport {
        inner: MockTransport,
        gate: Arc<Notify>,
    }

    impl Transport for GatedTransport {
        async fn send(&self, request: api::ApiRequest) -> Result<serde_json::Value, TransportError> {
            self.gate.notified().await;
            self.inner.send(request).await
        }
    }

    fn gated(mock: &MockTransport, tokens: &MemoryStore) -> (SessionStore<GatedTransport, MemoryStore>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let transport = GatedTransport {
            inner: mock.clone(),
            gate: gate.clone(),
        };
        (SessionStore::new(ApiClient::new(transport), tokens.clone()), gate)
    }

    fn session(mock: &MockTransport, tokens: &MemoryStore) -> SessionStore<MockTransport, MemoryStore> {
        SessionStore::new(ApiClient::new(mock.clone()), tokens.clone())
    }

    fn credentials() -> LoginData {
        LoginData {
            email: "admin@example.com".into(),
            password: "secret".into(),
        }
    }

    fn me_response() -> serde_json::Value {
        json!({ "success": true, "data": { "user": { "_id": "u1", "username": "admin" } } })
    }

    fn login_response(token: &str) -> serde_json::Value {
        json!({ "success": true, "data": { "user": { "_id": "u1", "username": "admin" }, "token": token } })
    }

    fn assert_consistent(state: &AuthState) {
        assert_eq!(state.is_authenticated(), state.user.is_some());
    }

    #[tokio::test]
    async fn test_starts_initializing() {
        let store = session(&MockTransport::new(), &MemoryStore::new());
        let state = store.state();
        assert!(state.initializing);
        assert_eq!(state.status(), SessionStatus::Initializing);
        assert_consistent(&state);
    }

    #[tokio::test]
    async fn test_initialize_without_token_makes_no_call() {
        let mock = MockTransport::new();
        let store = session(&mock, &MemoryStore::new());

        store.initialize().await;

        let state = store.state();
        assert!(!state.initializing);
        assert!(state.user.is_none());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_with_valid_token() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/auth/me", me_response());
        let tokens = MemoryStore::with_token("jwt");
        let store = session(&mock, &tokens);

        store.initialize().await;

        assert_eq!(store.state().status(), SessionStatus::Authenticated);
        assert_eq!(store.user().unwrap().display_name(), "admin");
        let check = mock.last(Method::Get, "/auth/me").unwrap();
        assert_eq!(check.header("Authorization"), Some("Bearer jwt"));
    }

    #[tokio::test]
    async fn test_initialize_401_removes_token() {
        let mock = MockTransport::new();
        mock.status(Method::Get, "/auth/me", 401);
        let tokens = MemoryStore::with_token("expired");
        let store = session(&mock, &tokens);

        store.initialize().await;

        assert!(tokens.load().is_none());
        let state = store.state();
        assert!(state.user.is_none());
        assert!(!state.initializing);
    }

    #[tokio::test]
    async fn test_initialize_other_failure_keeps_token_but_signs_out() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/auth/me", Err(TransportError::Timeout));
        let tokens = MemoryStore::with_token("jwt");
        let store = session(&mock, &tokens);

        store.initialize().await;

        assert_eq!(tokens.load(), Some("jwt".to_string()));
        assert_eq!(store.state().status(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/auth/me", me_response());
        let store = session(&mock, &MemoryStore::with_token("jwt"));

        store.initialize().await;
        store.logout();
        store.initialize().await;

        assert_eq!(mock.count(Method::Get, "/auth/me"), 1);
        assert_eq!(store.state().status(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_concurrent_initialize_checks_once() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/auth/me", me_response());
        let store = session(&mock, &MemoryStore::with_token("jwt"));

        tokio::join!(store.initialize(), store.initialize());

        assert_eq!(mock.count(Method::Get, "/auth/me"), 1);
        assert_eq!(store.state().status(), SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn test_login_before_initialize_settles_session() {
        let mock = MockTransport::new();
        mock.ok(Method::Post, "/auth/login", login_response("fresh-jwt"));
        mock.ok(Method::Get, "/auth/me", me_response());
        let store = session(&mock, &MemoryStore::with_token("old-jwt"));

        store.login(&credentials()).await.unwrap();
        assert_eq!(store.state().status(), SessionStatus::Authenticated);

        store.initialize().await;
        assert_eq!(mock.count(Method::Get, "/auth/me"), 0);
        assert_eq!(store.state().status(), SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn test_logout_during_revalidate_wins() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/auth/me", me_response());
        let tokens = MemoryStore::with_token("jwt");
        let (store, gate) = gated(&mock, &tokens);

        tokio::join!(store.revalidate(), async {
            store.logout();
            gate.notify_one();
        });

        assert!(!store.is_authenticated());
        assert!(tokens.load().is_none());
        assert_eq!(mock.count(Method::Get, "/auth/me"), 1);
    }

    #[tokio::test]
    async fn test_logout_during_initialize_wins() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/auth/me", me_response());
        let tokens = MemoryStore::with_token("jwt");
        let (store, gate) = gated(&mock, &tokens);

        tokio::join!(store.initialize(), async {
            store.logout();
            gate.notify_one();
        });

        let state = store.state();
        assert!(!state.initializing);
        assert!(state.user.is_none());
        assert!(tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_logout_during_login_discards_token() {
        let mock = MockTransport::new();
        mock.ok(Method::Post, "/auth/login", login_response("late-jwt"));
        let tokens = MemoryStore::new();
        let (store, gate) = gated(&mock, &tokens);

        let creds = credentials();
        let (result, _) = tokio::join!(store.login(&creds), async {
            store.logout();
            gate.notify_one();
        });

        assert!(matches!(result, Err(SessionError::SignedOut)));
        assert!(!store.is_authenticated());
        assert!(tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_server_token() {
        let mock = MockTransport::new();
        mock.ok(Method::Post, "/auth/login", login_response("fresh-jwt"));
        let tokens = MemoryStore::new();
        let store = session(&mock, &tokens);
        store.initialize().await;

        let user = store.login(&credentials()).await.unwrap();

        assert_eq!(user.display_name(), "admin");
        assert_eq!(tokens.load(), Some("fresh-jwt".to_string()));
        assert_eq!(store.state().status(), SessionStatus::Authenticated);
        assert_eq!(store.token(), Some("fresh-jwt".to_string()));
    }

    #[tokio::test]
    async fn test_logout_removes_token() {
        let mock = MockTransport::new();
        mock.ok(Method::Post, "/auth/login", login_response("fresh-jwt"));
        let tokens = MemoryStore::new();
        let store = session(&mock, &tokens);
        store.initialize().await;
        store.login(&credentials()).await.unwrap();

        store.logout();

        assert!(tokens.load().is_none());
        assert!(!store.is_authenticated());
        assert_consistent(&store.state());
    }

    #[tokio::test]
    async fn test_login_failure_propagates_and_stays_signed_out() {
        let mock = MockTransport::new();
        mock.status(Method::Post, "/auth/login", 401);
        let tokens = MemoryStore::new();
        let store = session(&mock, &tokens);
        store.initialize().await;

        let err = store.login(&credentials()).await.unwrap_err();

        assert!(matches!(&err, SessionError::Api(e) if e.is_unauthorized()));
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(store.user().is_none());
        assert!(tokens.load().is_none());
    }

    #[tokio::test]
    async fn test_unsuccessful_response_is_rejected() {
        let mock = MockTransport::new();
        mock.ok(
            Method::Post,
            "/auth/register",
            json!({ "success": false, "message": "Email already registered" }),
        );
        let tokens = MemoryStore::new();
        let store = session(&mock, &tokens);
        let data = RegisterData {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "secret".into(),
        };

        let err = store.register(&data).await.unwrap_err();

        assert_eq!(err, SessionError::Rejected("Email already registered".into()));
        assert!(tokens.load().is_none());
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let mock = MockTransport::new();
        mock.ok(Method::Post, "/auth/register", login_response("new-jwt"));
        let tokens = MemoryStore::new();
        let store = session(&mock, &tokens);

        store.register(&RegisterData::default()).await.unwrap();

        assert_eq!(tokens.load(), Some("new-jwt".to_string()));
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_revalidate_signs_out_on_401() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/auth/me", me_response());
        mock.status(Method::Get, "/auth/me", 401);
        let tokens = MemoryStore::with_token("jwt");
        let store = session(&mock, &tokens);
        store.initialize().await;
        assert!(store.is_authenticated());

        store.revalidate().await;

        assert!(!store.is_authenticated());
        assert!(tokens.load().is_none());
        assert!(!store.state().initializing);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let mock = MockTransport::new();
        mock.ok(Method::Post, "/auth/login", login_response("jwt"));
        let store = session(&mock, &MemoryStore::new());
        let mut updates = store.subscribe();

        store.initialize().await;
        assert!(updates.has_changed().unwrap());
        assert!(!updates.borrow_and_update().initializing);

        store.login(&credentials()).await.unwrap();
        assert!(updates.borrow_and_update().is_authenticated());

        store.logout();
        assert!(!updates.borrow_and_update().is_authenticated());
    }

    #[tokio::test]
    async fn test_authenticated_always_matches_user() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/auth/me", me_response());
        mock.ok(Method::Post, "/auth/login", login_response("jwt"));
        let store = session(&mock, &MemoryStore::with_token("jwt"));

        assert_consistent(&store.state());
        store.initialize().await;
        assert_consistent(&store.state());
        store.logout();
        assert_consistent(&store.state());
        let _ = store.login(&credentials()).await;
        assert_consistent(&store.state());
        store.revalidate().await;
        assert_consistent(&store.state());
        store.logout();
        assert_consistent(&store.state());
    }
}
