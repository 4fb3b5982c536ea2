//! Admin writes and full-collection reads for blog posts and projects.
//!
//! Every call carries `Authorization: Bearer <token>`; the caller supplies the token
//! per call. Drafts are validated before transmission. Write responses are returned
//! as opaque JSON since callers only need to know the write went through.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{BlogPost, BlogPostDraft, ListResponse, Project, ProjectDraft};
use crate::transport::{encode_segment, ApiRequest, Transport};

const ADMIN_BLOG: &str = "/admin/blog";
const ADMIN_PROJECTS: &str = "/admin/projects";

fn item_path(base: &str, id: &str) -> String {
    format!("{base}/{}", encode_segment(id))
}

impl<T: Transport> ApiClient<T> {
    /// `GET /admin/blog`, drafts included.
    pub async fn admin_blog_posts(&self, token: &str) -> Result<ListResponse<BlogPost>, ApiError> {
        self.call(ApiRequest::get(ADMIN_BLOG).with_bearer(token)).await
    }

    /// `POST /admin/blog`
    pub async fn create_blog_post(&self, token: &str, draft: &BlogPostDraft) -> Result<Value, ApiError> {
        draft.validate()?;
        let request = ApiRequest::post(ADMIN_BLOG).with_bearer(token).with_json(draft)?;
        self.call(request).await
    }

    /// `PUT /admin/blog/{id}`
    pub async fn update_blog_post(
        &self,
        token: &str,
        id: &str,
        draft: &BlogPostDraft,
    ) -> Result<Value, ApiError> {
        draft.validate()?;
        let request = ApiRequest::put(item_path(ADMIN_BLOG, id))
            .with_bearer(token)
            .with_json(draft)?;
        self.call(request).await
    }

    /// `DELETE /admin/blog/{id}`
    pub async fn delete_blog_post(&self, token: &str, id: &str) -> Result<Value, ApiError> {
        self.call(ApiRequest::delete(item_path(ADMIN_BLOG, id)).with_bearer(token))
            .await
    }

    /// `GET /admin/projects`
    pub async fn admin_projects(&self, token: &str) -> Result<ListResponse<Project>, ApiError> {
        self.call(ApiRequest::get(ADMIN_PROJECTS).with_bearer(token)).await
    }

    /// `POST /admin/projects`
    pub async fn create_project(&self, token: &str, draft: &ProjectDraft) -> Result<Value, ApiError> {
        draft.validate()?;
        let request = ApiRequest::post(ADMIN_PROJECTS).with_bearer(token).with_json(draft)?;
        self.call(request).await
    }

    /// `PUT /admin/projects/{id}`
    pub async fn update_project(
        &self,
        token: &str,
        id: &str,
        draft: &ProjectDraft,
    ) -> Result<Value, ApiError> {
        draft.validate()?;
        let request = ApiRequest::put(item_path(ADMIN_PROJECTS, id))
            .with_bearer(token)
            .with_json(draft)?;
        self.call(request).await
    }

    /// `DELETE /admin/projects/{id}`
    pub async fn delete_project(&self, token: &str, id: &str) -> Result<Value, ApiError> {
        self.call(ApiRequest::delete(item_path(ADMIN_PROJECTS, id)).with_bearer(token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::error::{ApiError, DraftError};
    use crate::mock::MockTransport;
    use crate::models::{BlogPostDraft, ProjectDraft, ProjectStatus};
    use crate::transport::Method;
    use crate::ApiClient;

    fn blog_draft() -> BlogPostDraft {
        BlogPostDraft {
            title: "Hello".into(),
            content: "Body".into(),
            excerpt: "Intro".into(),
            tags: vec!["react".into(), "ts".into()],
            published: true,
            featured_image: None,
        }
    }

    #[tokio::test]
    async fn test_create_blog_post_sends_bearer_and_draft() {
        let mock = MockTransport::new();
        mock.ok(Method::Post, "/admin/blog", json!({ "success": true }));
        let api = ApiClient::new(mock.clone());

        api.create_blog_post("jwt", &blog_draft()).await.unwrap();

        let sent = mock.last(Method::Post, "/admin/blog").unwrap();
        assert_eq!(sent.header("Authorization"), Some("Bearer jwt"));
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        let body = sent.body.unwrap();
        assert_eq!(body["tags"], json!(["react", "ts"]));
        assert!(body.get("featuredImage").is_none());
    }

    #[tokio::test]
    async fn test_invalid_draft_is_never_sent() {
        let mock = MockTransport::new();
        let api = ApiClient::new(mock.clone());
        let draft = BlogPostDraft {
            title: String::new(),
            ..blog_draft()
        };

        let err = api.update_blog_post("jwt", "p1", &draft).await.unwrap_err();
        assert_eq!(err, ApiError::InvalidDraft(DraftError::MissingField("title")));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_project_writes_target_item_paths() {
        let mock = MockTransport::new();
        mock.ok(Method::Put, "/admin/projects/42", json!({ "success": true }));
        mock.ok(Method::Delete, "/admin/projects/42", Default::default());
        let api = ApiClient::new(mock.clone());
        let draft = ProjectDraft {
            title: "A".into(),
            description: "B".into(),
            detailed_description: String::new(),
            technologies: vec!["Rust".into()],
            github_url: String::new(),
            live_url: None,
            image_url: String::new(),
            featured: false,
            category: "web-dev".into(),
            status: ProjectStatus::InProgress,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
        };

        api.update_project("jwt", "42", &draft).await.unwrap();
        api.delete_project("jwt", "42").await.unwrap();

        assert_eq!(mock.count(Method::Put, "/admin/projects/42"), 1);
        let deleted = mock.last(Method::Delete, "/admin/projects/42").unwrap();
        assert_eq!(deleted.header("Authorization"), Some("Bearer jwt"));
        assert!(deleted.body.is_none());
    }
}
