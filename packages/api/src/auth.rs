//! Session accessors: login, register, and the current-user check.
//!
//! These calls only talk to the API. Persisting the returned token and tracking who
//! is signed in is the session store's job.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, DataResponse, LoginData, MePayload, RegisterData};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> ApiClient<T> {
    /// `POST /auth/login`
    pub async fn login(&self, credentials: &LoginData) -> Result<AuthResponse, ApiError> {
        self.call(ApiRequest::post("/auth/login").with_json(credentials)?)
            .await
    }

    /// `POST /auth/register`
    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        self.call(ApiRequest::post("/auth/register").with_json(data)?)
            .await
    }

    /// `GET /auth/me` with the bearer token.
    pub async fn current_user(&self, token: &str) -> Result<DataResponse<MePayload>, ApiError> {
        self.call(ApiRequest::get("/auth/me").with_bearer(token)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::mock::MockTransport;
    use crate::models::LoginData;
    use crate::transport::Method;
    use crate::ApiClient;

    #[tokio::test]
    async fn test_login_returns_user_and_token() {
        let mock = MockTransport::new();
        mock.ok(
            Method::Post,
            "/auth/login",
            json!({ "success": true, "data": { "user": { "_id": "u1", "username": "admin" }, "token": "jwt" } }),
        );
        let api = ApiClient::new(mock.clone());
        let credentials = LoginData {
            email: "admin@example.com".into(),
            password: "secret".into(),
        };

        let response = api.login(&credentials).await.unwrap();
        let payload = response.data.unwrap();
        assert_eq!(payload.token, "jwt");
        assert_eq!(payload.user.display_name(), "admin");

        let sent = mock.last(Method::Post, "/auth/login").unwrap();
        assert_eq!(sent.header("Authorization"), None);
        assert_eq!(sent.body.as_ref().unwrap()["email"], "admin@example.com");
    }

    #[tokio::test]
    async fn test_current_user_sends_bearer() {
        let mock = MockTransport::new();
        mock.ok(
            Method::Get,
            "/auth/me",
            json!({ "success": true, "data": { "user": { "_id": "u1" } } }),
        );
        let api = ApiClient::new(mock.clone());

        let response = api.current_user("jwt").await.unwrap();
        assert_eq!(response.data.user.id.as_deref(), Some("u1"));

        let sent = mock.last(Method::Get, "/auth/me").unwrap();
        assert_eq!(sent.header("authorization"), Some("Bearer jwt"));
    }

    #[tokio::test]
    async fn test_current_user_401_is_unauthorized() {
        let mock = MockTransport::new();
        mock.status(Method::Get, "/auth/me", 401);
        let api = ApiClient::new(mock);

        assert!(api.current_user("stale").await.unwrap_err().is_unauthorized());
    }
}
