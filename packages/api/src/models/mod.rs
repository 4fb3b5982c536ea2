//! Wire models, response envelopes and write drafts.

mod blog;
mod contact;
mod project;
mod response;
mod user;

pub use blog::{BlogPost, BlogPostDraft, BlogPostForm, Pagination};
pub use contact::ContactForm;
pub use project::{Project, ProjectDraft, ProjectForm, ProjectStatus, PROJECT_CATEGORIES};
pub use response::{DataResponse, ListResponse, StatusMessage};
pub use user::{AuthPayload, AuthResponse, LoginData, MePayload, RegisterData, User};

/// Split a comma-separated editor field into trimmed, non-empty entries.
pub(crate) fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// `None` for a blank optional field, the trimmed value otherwise.
pub(crate) fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Date portion of an ISO-8601 timestamp (`2024-01-15T00:00:00Z` → `2024-01-15`).
pub(crate) fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}
