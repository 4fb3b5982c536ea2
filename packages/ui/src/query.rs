//! # View queries: loading / data / error for one async fetch
//!
//! A [`Query`] is what a view binds to: the last successful data, whether a fetch is
//! in flight, and a short error message. Every [`run`](Query::run) starts a new
//! generation. When a fetch settles its result is applied only if no newer run has
//! started since; otherwise it is dropped. A slow response to an old parameter value
//! can therefore never overwrite the data for the current one.
//!
//! On failure the data is left as it was (stale but present, or empty if nothing has
//! loaded yet) and `error` is set to the query's fixed message. The raw error only
//! goes to the log.
//!
//! The loaders at the bottom of this module wire each view's accessor call to its
//! message; the Dioxus hooks in [`crate::hooks`] call them whenever their inputs change.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use api::models::{BlogPost, ListResponse, Pagination, Project};
use api::{ApiClient, ApiError, Transport};
use tokio::sync::watch;

pub const PROJECTS_ERROR: &str = "Failed to fetch projects";
pub const FEATURED_PROJECTS_ERROR: &str = "Failed to fetch featured projects";
pub const BLOG_POSTS_ERROR: &str = "Failed to fetch blog posts";
pub const BLOG_POST_ERROR: &str = "Blog post not found";
pub const NO_SLUG_ERROR: &str = "No blog post specified";
pub const TAG_POSTS_ERROR: &str = "Failed to fetch posts for tag";

/// Tri-state a view binds to.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<D> {
    pub data: D,
    pub loading: bool,
    pub error: Option<String>,
}

impl<D: Default> Default for ViewState<D> {
    fn default() -> Self {
        Self {
            data: D::default(),
            loading: true,
            error: None,
        }
    }
}

/// One page of a list, replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

impl<T> From<ListResponse<T>> for Page<T> {
    fn from(response: ListResponse<T>) -> Self {
        Self {
            items: response.data,
            pagination: response.pagination,
        }
    }
}

pub type ListState<T> = ViewState<Page<T>>;
pub type ItemState<T> = ViewState<Option<T>>;

impl<T> ViewState<Page<T>> {
    pub fn items(&self) -> &[T] {
        &self.data.items
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.data.pagination.as_ref()
    }
}

/// Generation-tracked holder for one view's state.
pub struct Query<D> {
    state: watch::Sender<ViewState<D>>,
    issued: AtomicU64,
    message: &'static str,
}

impl<D: Default + Clone> Query<D> {
    /// A query whose failures surface as `message`.
    pub fn new(message: &'static str) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            state,
            issued: AtomicU64::new(0),
            message,
        }
    }

    pub fn state(&self) -> ViewState<D> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<D>> {
        self.state.subscribe()
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Start a fetch and adopt its result if it is still the latest.
    ///
    /// Returns whether the result was applied.
    pub async fn run<F>(&self, fetch: F) -> bool
    where
        F: Future<Output = Result<D, ApiError>>,
    {
        let generation = self.begin();
        let result = fetch.await;
        self.settle(generation, result)
    }

    /// Fail immediately without fetching, e.g. when a required input is missing.
    pub fn reject(&self, message: &str) {
        self.issued.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.loading = false;
            state.error = Some(message.to_string());
        });
    }

    fn begin(&self) -> u64 {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        generation
    }

    fn settle(&self, generation: u64, result: Result<D, ApiError>) -> bool {
        if generation != self.issued.load(Ordering::SeqCst) {
            tracing::debug!("Discarding superseded response (generation {})", generation);
            return false;
        }
        match result {
            Ok(data) => self.state.send_modify(|state| {
                state.data = data;
                state.loading = false;
                state.error = None;
            }),
            Err(e) => {
                tracing::error!("{}: {}", self.message, e);
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(self.message.to_string());
                });
            }
        }
        true
    }
}

/// Treat the public filter's `"all"` (or nothing) as no category.
pub fn category_filter(category: Option<&str>) -> Option<&str> {
    category.filter(|c| !c.is_empty() && *c != "all")
}

pub async fn load_projects<T: Transport>(
    query: &Query<Page<Project>>,
    api: &ApiClient<T>,
    category: Option<&str>,
) -> bool {
    let category = category_filter(category);
    query
        .run(async { api.projects(category).await.map(Page::from) })
        .await
}

pub async fn load_featured_projects<T: Transport>(
    query: &Query<Page<Project>>,
    api: &ApiClient<T>,
) -> bool {
    query
        .run(async { api.featured_projects().await.map(Page::from) })
        .await
}

pub async fn load_blog_posts<T: Transport>(
    query: &Query<Page<BlogPost>>,
    api: &ApiClient<T>,
    page: u32,
    limit: u32,
) -> bool {
    query
        .run(async { api.blog_posts(page, limit).await.map(Page::from) })
        .await
}

pub async fn load_posts_by_tag<T: Transport>(
    query: &Query<Page<BlogPost>>,
    api: &ApiClient<T>,
    tag: &str,
) -> bool {
    query
        .run(async { api.posts_by_tag(tag).await.map(Page::from) })
        .await
}

/// Load one post; a missing slug fails without a call.
pub async fn load_blog_post<T: Transport>(
    query: &Query<Option<BlogPost>>,
    api: &ApiClient<T>,
    slug: Option<&str>,
) -> bool {
    let Some(slug) = slug.filter(|s| !s.trim().is_empty()) else {
        query.reject(NO_SLUG_ERROR);
        return true;
    };
    query
        .run(async { api.blog_post(slug).await.map(|r| Some(r.data)) })
        .await
}

/// Reachability of the content API as shown on the home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServerStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

/// Check `/health`.
pub async fn check_server<T: Transport>(api: &ApiClient<T>) -> ServerStatus {
    match api.health().await {
        Ok(_) => ServerStatus::Online,
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ServerStatus::Offline
        }
    }
}
