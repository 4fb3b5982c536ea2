//! Dioxus hooks binding views to [`Query`] loaders and admin managers.
//!
//! Each data hook owns one query for the lifetime of its component, mirrors the
//! query's state into a [`Signal`], and re-runs the loader whenever one of its
//! [`ReadOnlySignal`] inputs changes. Superseded results are dropped by the query,
//! so a fast parameter change never shows stale data.

use std::rc::Rc;

use api::models::{BlogPost, BlogPostForm, Project, ProjectForm};
use api::HttpTransport;
use dioxus::prelude::*;
use tokio::sync::watch;

use crate::admin::{AdminResource, BlogResource, ListManager, ManagerState, ProjectResource};
use crate::auth::use_api;
use crate::platform::{
    make_token_store, AppApi, AppBlogManager, AppProjectManager, PlatformTokenStore,
};
use crate::query::{
    check_server, load_blog_post, load_blog_posts, load_featured_projects, load_posts_by_tag,
    load_projects, ItemState, ListState, Query, ServerStatus, ViewState, BLOG_POSTS_ERROR,
    BLOG_POST_ERROR, FEATURED_PROJECTS_ERROR, PROJECTS_ERROR, TAG_POSTS_ERROR,
};

/// Mirror a `watch` channel into a signal for the lifetime of the component.
pub(crate) fn use_watch<T: Clone + 'static>(
    subscribe: impl FnOnce() -> watch::Receiver<T>,
) -> Signal<T> {
    let receiver = use_hook(subscribe);
    let mut signal = use_signal(|| receiver.borrow().clone());

    use_hook(move || {
        let mut receiver = receiver;
        spawn(async move {
            while receiver.changed().await.is_ok() {
                let value = receiver.borrow_and_update().clone();
                signal.set(value);
            }
        });
    });

    signal
}

fn use_query<D: Clone + Default + 'static>(
    message: &'static str,
) -> (Rc<Query<D>>, Signal<ViewState<D>>) {
    let query = use_hook(|| Rc::new(Query::new(message)));
    let state = use_watch({
        let query = query.clone();
        move || query.subscribe()
    });
    (query, state)
}

/// Projects, optionally filtered by category (`None` or `"all"` for every project).
pub fn use_projects(category: ReadOnlySignal<Option<String>>) -> Signal<ListState<Project>> {
    let api = use_api();
    let (query, state) = use_query(PROJECTS_ERROR);

    use_effect(move || {
        let category = category();
        let query = query.clone();
        let api = api.clone();
        spawn(async move {
            load_projects(&query, &api, category.as_deref()).await;
        });
    });

    state
}

/// Featured projects for the home page.
pub fn use_featured_projects() -> Signal<ListState<Project>> {
    let api = use_api();
    let (query, state) = use_query(FEATURED_PROJECTS_ERROR);

    use_hook(move || {
        spawn(async move {
            load_featured_projects(&query, &api).await;
        });
    });

    state
}

/// One page of published posts.
pub fn use_blog_posts(
    page: ReadOnlySignal<u32>,
    limit: ReadOnlySignal<u32>,
) -> Signal<ListState<BlogPost>> {
    let api = use_api();
    let (query, state) = use_query(BLOG_POSTS_ERROR);

    use_effect(move || {
        let (page, limit) = (page(), limit());
        let query = query.clone();
        let api = api.clone();
        spawn(async move {
            load_blog_posts(&query, &api, page, limit).await;
        });
    });

    state
}

/// A single post by slug. A missing slug yields an error without a request.
pub fn use_blog_post(slug: ReadOnlySignal<Option<String>>) -> Signal<ItemState<BlogPost>> {
    let api = use_api();
    let (query, state) = use_query(BLOG_POST_ERROR);

    use_effect(move || {
        let slug = slug();
        let query = query.clone();
        let api = api.clone();
        spawn(async move {
            load_blog_post(&query, &api, slug.as_deref()).await;
        });
    });

    state
}

pub fn use_posts_by_tag(tag: ReadOnlySignal<String>) -> Signal<ListState<BlogPost>> {
    let api = use_api();
    let (query, state) = use_query(TAG_POSTS_ERROR);

    use_effect(move || {
        let tag = tag();
        let query = query.clone();
        let api = api.clone();
        spawn(async move {
            load_posts_by_tag(&query, &api, &tag).await;
        });
    });

    state
}

/// Reachability of the API, checked once on mount.
pub fn use_server_status() -> Signal<ServerStatus> {
    let api = use_api();
    let mut status = use_signal(ServerStatus::default);

    use_hook(move || {
        spawn(async move {
            status.set(check_server(&api).await);
        });
    });

    status
}

pub type BlogHandle = (Rc<AppBlogManager>, Signal<ManagerState<BlogPost, BlogPostForm>>);
pub type ProjectHandle = (Rc<AppProjectManager>, Signal<ManagerState<Project, ProjectForm>>);

#[allow(clippy::type_complexity)]
fn use_manager<R>() -> (
    Rc<ListManager<R, HttpTransport, PlatformTokenStore>>,
    Signal<ManagerState<R::Item, R::Form>>,
)
where
    R: AdminResource + 'static,
    R::Item: 'static,
    R::Form: 'static,
{
    let api: AppApi = use_api();
    let manager = use_hook(|| Rc::new(ListManager::<R, _, _>::new(api, make_token_store())));
    let state = use_watch({
        let manager = manager.clone();
        move || manager.subscribe()
    });

    use_hook({
        let manager = manager.clone();
        move || {
            spawn(async move {
                let _ = manager.load().await;
            });
        }
    });

    (manager, state)
}

/// Blog tab of the admin dashboard; loads all posts on mount.
pub fn use_blog_manager() -> BlogHandle {
    use_manager::<BlogResource>()
}

/// Projects tab of the admin dashboard; loads all projects on mount.
pub fn use_project_manager() -> ProjectHandle {
    use_manager::<ProjectResource>()
}
