//! This crate contains the shared state layer for the portfolio frontends.
//!
//! The framework-independent pieces ([`session`], [`query`], [`admin`], [`guard`]'s
//! [`admission`]) are plain values over an [`api::ApiClient`] and a
//! [`store::TokenStore`] and are tested without a renderer. The Dioxus bindings
//! ([`AuthProvider`], the `use_*` hooks, [`ProtectedRoute`]) wire them to the
//! platform's HTTP client and token storage.

pub mod admin;
pub mod guard;
pub mod hooks;
pub mod query;
pub mod session;

mod auth;
pub use auth::{use_api, use_auth, use_login, use_register, use_session, AuthProvider, LogoutButton};

mod platform;
pub use platform::{
    confirm, make_api, make_config, make_token_store, redirect, AppApi, AppBlogManager,
    AppProjectManager, AppSession, PlatformTokenStore,
};

pub use admin::{
    AdminResource, BlogManager, BlogResource, Confirm, FormState, ListManager, ManagerState,
    ProjectManager, ProjectResource,
};
pub use guard::{admission, Admission, ProtectedRoute, LOGIN_ROUTE};
pub use hooks::{
    use_blog_manager, use_blog_post, use_blog_posts, use_featured_projects, use_posts_by_tag,
    use_project_manager, use_projects, use_server_status, BlogHandle, ProjectHandle,
};
pub use query::{ItemState, ListState, Page, Query, ServerStatus, ViewState};
pub use session::{AuthState, SessionError, SessionStatus, SessionStore};
