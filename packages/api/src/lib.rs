//! # API crate: typed client for the portfolio content API
//!
//! Everything the portfolio frontends need to talk to the remote content API: one
//! configured transport, the wire models, and stateless accessors per resource family.
//! Nothing here holds state between calls; the session and view layers in `ui` decide
//! what to keep.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`config`] | | Base URL (environment with hardcoded fallback) and fixed request timeout |
//! | [`transport`] | | [`Transport`] trait, [`ApiRequest`], and the `reqwest`-backed [`HttpTransport`] |
//! | [`error`] | | [`TransportError`], [`ApiError`], [`DraftError`] |
//! | [`models`] | | Projects, blog posts, users, response envelopes, write drafts and editor forms |
//! | [`mock`] | `test-support` | [`MockTransport`](mock::MockTransport), a scripted in-memory transport |
//!
//! ## Accessors on [`ApiClient`]
//!
//! - **Content**: `health`, `projects`, `featured_projects`, `project`, `blog_posts`,
//!   `blog_post`, `posts_by_tag`, `submit_contact`
//! - **Session**: `login`, `register`, `current_user`
//! - **Admin**: `admin_blog_posts`, `create_blog_post`, `update_blog_post`,
//!   `delete_blog_post`, `admin_projects`, `create_project`, `update_project`,
//!   `delete_project`
//!
//! Each accessor resolves with the decoded payload or fails with the transport's
//! error unmodified.

pub mod admin;
pub mod auth;
pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use content::DEFAULT_PAGE_LIMIT;
pub use error::{ApiError, DraftError, TransportError};
pub use models::{
    AuthResponse, BlogPost, BlogPostDraft, BlogPostForm, ContactForm, DataResponse, ListResponse,
    LoginData, Pagination, Project, ProjectDraft, ProjectForm, ProjectStatus, RegisterData,
    StatusMessage, User, PROJECT_CATEGORIES,
};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};
