//! # Admin list managers
//!
//! A [`ListManager`] backs one dashboard tab (blog posts or projects). It loads the
//! full collection, drives the create/edit form, and after every successful write it
//! reloads the whole collection instead of patching the list locally. The list may
//! show stale rows until that reload lands; in exchange it always ends up exactly as
//! the server has it.
//!
//! Failures never escalate: the raw error is logged, a short message goes to
//! [`ManagerState::error`], and the items and form are left as they were so the admin
//! can resubmit. Nothing is retried automatically.
//!
//! The resource-specific parts (which accessor to call, how the editor form maps to a
//! draft) live behind [`AdminResource`], implemented by [`BlogResource`] and
//! [`ProjectResource`].

use std::future::Future;

use api::models::{BlogPost, BlogPostDraft, BlogPostForm, Project, ProjectDraft, ProjectForm};
use api::{ApiClient, ApiError, DraftError, Transport};
use store::TokenStore;
use tokio::sync::watch;

/// Asks the admin to confirm a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// One admin-managed collection.
pub trait AdminResource {
    type Item: Clone;
    type Form: Clone + Default;
    type Draft;

    /// Singular noun used in messages, e.g. `"post"`.
    const NOUN: &'static str;
    /// Plural noun used in messages, e.g. `"posts"`.
    const PLURAL: &'static str;

    fn id(item: &Self::Item) -> &str;

    fn form_for(item: &Self::Item) -> Self::Form;

    fn draft(form: &Self::Form) -> Result<Self::Draft, DraftError>;

    fn list<T: Transport>(
        api: &ApiClient<T>,
        token: &str,
    ) -> impl Future<Output = Result<Vec<Self::Item>, ApiError>>;

    fn create<T: Transport>(
        api: &ApiClient<T>,
        token: &str,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn update<T: Transport>(
        api: &ApiClient<T>,
        token: &str,
        id: &str,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn delete<T: Transport>(
        api: &ApiClient<T>,
        token: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), ApiError>>;
}

/// Blog posts under `/admin/blog`.
pub struct BlogResource;

impl AdminResource for BlogResource {
    type Item = BlogPost;
    type Form = BlogPostForm;
    type Draft = BlogPostDraft;

    const NOUN: &'static str = "post";
    const PLURAL: &'static str = "posts";

    fn id(item: &BlogPost) -> &str {
        &item.id
    }

    fn form_for(item: &BlogPost) -> BlogPostForm {
        BlogPostForm::from_post(item)
    }

    fn draft(form: &BlogPostForm) -> Result<BlogPostDraft, DraftError> {
        form.to_draft()
    }

    async fn list<T: Transport>(api: &ApiClient<T>, token: &str) -> Result<Vec<BlogPost>, ApiError> {
        Ok(api.admin_blog_posts(token).await?.data)
    }

    async fn create<T: Transport>(
        api: &ApiClient<T>,
        token: &str,
        draft: &BlogPostDraft,
    ) -> Result<(), ApiError> {
        api.create_blog_post(token, draft).await.map(drop)
    }

    async fn update<T: Transport>(
        api: &ApiClient<T>,
        token: &str,
        id: &str,
        draft: &BlogPostDraft,
    ) -> Result<(), ApiError> {
        api.update_blog_post(token, id, draft).await.map(drop)
    }

    async fn delete<T: Transport>(api: &ApiClient<T>, token: &str, id: &str) -> Result<(), ApiError> {
        api.delete_blog_post(token, id).await.map(drop)
    }
}

/// Projects under `/admin/projects`.
pub struct ProjectResource;

impl AdminResource for ProjectResource {
    type Item = Project;
    type Form = ProjectForm;
    type Draft = ProjectDraft;

    const NOUN: &'static str = "project";
    const PLURAL: &'static str = "projects";

    fn id(item: &Project) -> &str {
        &item.id
    }

    fn form_for(item: &Project) -> ProjectForm {
        ProjectForm::from_project(item)
    }

    fn draft(form: &ProjectForm) -> Result<ProjectDraft, DraftError> {
        form.to_draft()
    }

    async fn list<T: Transport>(api: &ApiClient<T>, token: &str) -> Result<Vec<Project>, ApiError> {
        Ok(api.admin_projects(token).await?.data)
    }

    async fn create<T: Transport>(
        api: &ApiClient<T>,
        token: &str,
        draft: &ProjectDraft,
    ) -> Result<(), ApiError> {
        api.create_project(token, draft).await.map(drop)
    }

    async fn update<T: Transport>(
        api: &ApiClient<T>,
        token: &str,
        id: &str,
        draft: &ProjectDraft,
    ) -> Result<(), ApiError> {
        api.update_project(token, id, draft).await.map(drop)
    }

    async fn delete<T: Transport>(api: &ApiClient<T>, token: &str, id: &str) -> Result<(), ApiError> {
        api.delete_project(token, id).await.map(drop)
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Create,
    Update,
    Delete,
    Save,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Save => "save",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            Self::Create => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
            Self::Save => "saving",
        }
    }
}

/// The open editor: which item is being edited (none for a new one) and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F> {
    pub editing: Option<String>,
    pub fields: F,
}

/// Everything a dashboard tab renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerState<I, F> {
    pub items: Vec<I>,
    pub loading: bool,
    pub error: Option<String>,
    pub form: Option<FormState<F>>,
}

impl<I, F> Default for ManagerState<I, F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            form: None,
        }
    }
}

pub type BlogManager<T, S> = ListManager<BlogResource, T, S>;
pub type ProjectManager<T, S> = ListManager<ProjectResource, T, S>;

/// Stateful controller for one admin collection.
pub struct ListManager<R: AdminResource, T, S> {
    api: ApiClient<T>,
    tokens: S,
    state: watch::Sender<ManagerState<R::Item, R::Form>>,
}

impl<R, T, S> ListManager<R, T, S>
where
    R: AdminResource,
    T: Transport,
    S: TokenStore,
{
    pub fn new(api: ApiClient<T>, tokens: S) -> Self {
        let (state, _) = watch::channel(ManagerState::default());
        Self { api, tokens, state }
    }

    pub fn state(&self) -> ManagerState<R::Item, R::Form> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ManagerState<R::Item, R::Form>> {
        self.state.subscribe()
    }

    fn token(&self) -> Result<String, ApiError> {
        self.tokens.load().ok_or(ApiError::MissingToken)
    }

    fn fail(&self, action: Action, error: &ApiError) {
        tracing::error!("Error {} {}: {}", action.gerund(), R::NOUN, error);
        let message = match error {
            ApiError::InvalidDraft(e) => e.to_string(),
            ApiError::MissingToken => "Session expired, please log in again".to_string(),
            _ => format!("Failed to {} {}", action.verb(), R::NOUN),
        };
        self.state.send_modify(|state| state.error = Some(message));
    }

    /// Replace `items` with the full collection from the server.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.state.send_modify(|state| state.loading = true);
        let result = match self.token() {
            Ok(token) => R::list(&self.api, &token).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(items) => {
                self.state.send_modify(|state| {
                    state.items = items;
                    state.loading = false;
                    state.error = None;
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading {}: {}", R::PLURAL, e);
                self.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(format!("Failed to load {}", R::PLURAL));
                });
                Err(e)
            }
        }
    }

    /// Create one item, then reload.
    pub async fn create(&self, draft: &R::Draft) -> Result<(), ApiError> {
        let token = self.token().inspect_err(|e| self.fail(Action::Create, e))?;
        R::create(&self.api, &token, draft)
            .await
            .inspect_err(|e| self.fail(Action::Create, e))?;
        self.reload_after_write().await;
        Ok(())
    }

    /// Update the item with `id`, then reload.
    pub async fn update(&self, id: &str, draft: &R::Draft) -> Result<(), ApiError> {
        let token = self.token().inspect_err(|e| self.fail(Action::Update, e))?;
        R::update(&self.api, &token, id, draft)
            .await
            .inspect_err(|e| self.fail(Action::Update, e))?;
        self.reload_after_write().await;
        Ok(())
    }

    /// Delete the item with `id` once the admin confirms, then reload.
    ///
    /// Returns `Ok(false)` when the prompt was declined; nothing is sent then.
    pub async fn delete(&self, id: &str, confirm: &impl Confirm) -> Result<bool, ApiError> {
        let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }
        let token = self.token().inspect_err(|e| self.fail(Action::Delete, e))?;
        R::delete(&self.api, &token, id)
            .await
            .inspect_err(|e| self.fail(Action::Delete, e))?;
        self.reload_after_write().await;
        Ok(true)
    }

    async fn reload_after_write(&self) {
        // load() already records its own failure.
        let _ = self.load().await;
    }

    /// Open an empty editor.
    pub fn open_new(&self) {
        self.state.send_modify(|state| {
            state.form = Some(FormState {
                editing: None,
                fields: R::Form::default(),
            });
        });
    }

    /// Open the editor pre-filled from `item`.
    pub fn edit(&self, item: &R::Item) {
        let form = FormState {
            editing: Some(R::id(item).to_string()),
            fields: R::form_for(item),
        };
        self.state.send_modify(|state| state.form = Some(form));
    }

    /// Change the open editor's fields. No-op when no editor is open.
    pub fn update_form(&self, change: impl FnOnce(&mut R::Form)) {
        self.state.send_modify(|state| {
            if let Some(form) = state.form.as_mut() {
                change(&mut form.fields);
            }
        });
    }

    /// Close the editor, discarding its fields.
    pub fn cancel(&self) {
        self.state.send_modify(|state| state.form = None);
    }

    /// Save the open editor: create for a new item, update for an edited one.
    ///
    /// On success the editor closes and the list reloads. On failure the editor
    /// stays open with its fields intact.
    pub async fn submit(&self) -> Result<(), ApiError> {
        let Some(form) = self.state.borrow().form.clone() else {
            return Ok(());
        };
        let draft = R::draft(&form.fields)
            .map_err(ApiError::from)
            .inspect_err(|e| self.fail(Action::Save, e))?;

        let token = self.token().inspect_err(|e| self.fail(Action::Save, e))?;
        let written = match &form.editing {
            Some(id) => R::update(&self.api, &token, id, &draft).await,
            None => R::create(&self.api, &token, &draft).await,
        };
        written.inspect_err(|e| self.fail(Action::Save, e))?;

        self.state.send_modify(|state| {
            state.form = None;
            state.error = None;
        });
        self.reload_after_write().await;
        Ok(())
    }
}
