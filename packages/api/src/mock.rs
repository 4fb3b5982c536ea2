//! Scripted in-memory [`Transport`] for tests.
//!
//! Responses are registered per `(method, target)` where `target` is the path plus
//! encoded query string, exactly as [`ApiRequest::target`] renders it. Several
//! responses for one route are served in order; the last one repeats. Requests with
//! no registered route answer `404`. Every request is recorded for assertions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::error::TransportError;
use crate::transport::{ApiRequest, Method, Transport};

type Route = (Method, String);

#[derive(Debug, Default)]
struct MockState {
    routes: HashMap<Route, Vec<Result<Value, TransportError>>>,
    requests: Vec<ApiRequest>,
}

/// In-memory Transport. Clones share routes and the request log.
#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `method target`.
    pub fn on(&self, method: Method, target: &str, response: Result<Value, TransportError>) -> &Self {
        self.lock()
            .routes
            .entry((method, target.to_string()))
            .or_default()
            .push(response);
        self
    }

    /// Queue a successful JSON response.
    pub fn ok(&self, method: Method, target: &str, body: Value) -> &Self {
        self.on(method, target, Ok(body))
    }

    /// Queue an HTTP error status.
    pub fn status(&self, method: Method, target: &str, status: u16) -> &Self {
        self.on(
            method,
            target,
            Err(TransportError::HttpStatus {
                status,
                body: String::new(),
            }),
        )
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests sent to `method target`.
    pub fn count(&self, method: Method, target: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.target() == target)
            .count()
    }

    /// The most recent request sent to `method target`.
    pub fn last(&self, method: Method, target: &str) -> Option<ApiRequest> {
        self.lock()
            .requests
            .iter()
            .rev()
            .find(|r| r.method == method && r.target() == target)
            .cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let mut state = self.lock();
        let route = (request.method, request.target());
        state.requests.push(request);
        match state.routes.get_mut(&route) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) => queue.first().cloned().unwrap_or(Ok(Value::Null)),
            None => Err(TransportError::HttpStatus {
                status: 404,
                body: format!("no mock for {} {}", route.0, route.1),
            }),
        }
    }
}
