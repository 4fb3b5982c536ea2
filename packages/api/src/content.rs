//! Public content reads: health, projects, blog posts, and the contact form.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{BlogPost, ContactForm, DataResponse, ListResponse, Project, StatusMessage};
use crate::transport::{encode_segment, ApiRequest, Transport};

/// Default page size for the blog listing.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

impl<T: Transport> ApiClient<T> {
    /// `GET /health`
    pub async fn health(&self) -> Result<StatusMessage, ApiError> {
        self.call(ApiRequest::get("/health")).await
    }

    /// `GET /projects`, optionally filtered by category.
    pub async fn projects(&self, category: Option<&str>) -> Result<ListResponse<Project>, ApiError> {
        let mut request = ApiRequest::get("/projects");
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            request = request.with_query("category", category);
        }
        self.call(request).await
    }

    /// `GET /projects/featured`
    pub async fn featured_projects(&self) -> Result<ListResponse<Project>, ApiError> {
        self.call(ApiRequest::get("/projects/featured")).await
    }

    /// `GET /projects/{id}`
    pub async fn project(&self, id: &str) -> Result<DataResponse<Project>, ApiError> {
        self.call(ApiRequest::get(format!("/projects/{}", encode_segment(id))))
            .await
    }

    /// `GET /blog?page=&limit=`
    pub async fn blog_posts(&self, page: u32, limit: u32) -> Result<ListResponse<BlogPost>, ApiError> {
        let request = ApiRequest::get("/blog")
            .with_query("page", page)
            .with_query("limit", limit);
        self.call(request).await
    }

    /// `GET /blog/{slug}`
    pub async fn blog_post(&self, slug: &str) -> Result<DataResponse<BlogPost>, ApiError> {
        self.call(ApiRequest::get(format!("/blog/{}", encode_segment(slug))))
            .await
    }

    /// `GET /blog/tag/{tag}`
    pub async fn posts_by_tag(&self, tag: &str) -> Result<ListResponse<BlogPost>, ApiError> {
        self.call(ApiRequest::get(format!("/blog/tag/{}", encode_segment(tag))))
            .await
    }

    /// `POST /contact`. The form is validated before anything is sent.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<StatusMessage, ApiError> {
        form.validate()?;
        self.call(ApiRequest::post("/contact").with_json(form)?).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::{ApiError, DraftError, TransportError};
    use crate::mock::MockTransport;
    use crate::models::{ContactForm, ProjectStatus};
    use crate::transport::Method;
    use crate::ApiClient;

    #[tokio::test]
    async fn test_featured_projects_decodes_payload() {
        let mock = MockTransport::new();
        mock.ok(
            Method::Get,
            "/projects/featured",
            json!({ "success": true, "data": [{ "_id": "1", "title": "A", "status": "planned" }] }),
        );
        let api = ApiClient::new(mock);

        let response = api.featured_projects().await.unwrap();
        assert!(response.success);
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].title, "A");
        assert_eq!(response.data[0].status, ProjectStatus::Planned);
    }

    #[tokio::test]
    async fn test_projects_category_filter() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/projects", json!({ "success": true, "data": [] }));
        mock.ok(Method::Get, "/projects?category=mobile", json!({ "success": true, "data": [] }));
        let api = ApiClient::new(mock.clone());

        api.projects(None).await.unwrap();
        api.projects(Some("mobile")).await.unwrap();
        api.projects(Some("")).await.unwrap();

        assert_eq!(mock.count(Method::Get, "/projects"), 2);
        assert_eq!(mock.count(Method::Get, "/projects?category=mobile"), 1);
    }

    #[tokio::test]
    async fn test_blog_posts_pagination() {
        let mock = MockTransport::new();
        mock.ok(
            Method::Get,
            "/blog?page=2&limit=5",
            json!({
                "success": true,
                "data": [{ "_id": "p1", "title": "Post", "slug": "post" }],
                "pagination": { "page": 2, "limit": 5, "total": 6, "pages": 2 }
            }),
        );
        let api = ApiClient::new(mock);

        let response = api.blog_posts(2, 5).await.unwrap();
        assert_eq!(response.data[0].slug, "post");
        assert_eq!(response.pagination.unwrap().total, 6);
    }

    #[tokio::test]
    async fn test_blog_post_slug_is_encoded() {
        let mock = MockTransport::new();
        mock.ok(
            Method::Get,
            "/blog/hello%20world",
            json!({ "success": true, "data": { "_id": "p1", "title": "Hi", "slug": "hello world" } }),
        );
        let api = ApiClient::new(mock);

        let response = api.blog_post("hello world").await.unwrap();
        assert_eq!(response.data.title, "Hi");
    }

    #[tokio::test]
    async fn test_transport_error_passes_through_unmodified() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/health", Err(TransportError::Timeout));
        mock.status(Method::Get, "/blog/tag/rust", 500);
        let api = ApiClient::new(mock);

        assert_eq!(
            api.health().await,
            Err(ApiError::Transport(TransportError::Timeout))
        );
        let err = api.posts_by_tag("rust").await.unwrap_err();
        assert_eq!(err.transport().and_then(|e| e.status()), Some(500));
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_decode_error() {
        let mock = MockTransport::new();
        mock.ok(Method::Get, "/projects/featured", json!({ "success": true, "data": "nope" }));
        let api = ApiClient::new(mock);

        assert!(matches!(api.featured_projects().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_contact_validates_before_sending() {
        let mock = MockTransport::new();
        let api = ApiClient::new(mock.clone());

        let err = api.submit_contact(&ContactForm::default()).await.unwrap_err();
        assert_eq!(err, ApiError::InvalidDraft(DraftError::MissingField("name")));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_contact_posts_json() {
        let mock = MockTransport::new();
        mock.ok(Method::Post, "/contact", json!({ "success": true, "message": "Thanks" }));
        let api = ApiClient::new(mock.clone());
        let form = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Nice site".into(),
        };

        let response = api.submit_contact(&form).await.unwrap();
        assert_eq!(response.message, "Thanks");

        let sent = mock.last(Method::Post, "/contact").unwrap();
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.body.unwrap()["subject"], "Hello");
    }
}
