use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::{Query, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;

/// Operations reachable through the route table.
///
/// Every method receives the routed request untouched and owns the whole
/// response: status, headers and body. Failures are the implementor's to
/// render; the router adds nothing on top.
#[async_trait]
pub trait Controller: Send + Sync + 'static {
    async fn get_all_groups(&self, request: RouteRequest) -> Response;

    async fn get_all_tests(&self, request: RouteRequest) -> Response;

    /// Path parameter: `generator`.
    async fn create_test_group(&self, request: RouteRequest) -> Response;

    /// Path parameter: `id`.
    async fn get_test_id(&self, request: RouteRequest) -> Response;

    /// Path parameter: `name`.
    async fn get_test_student(&self, request: RouteRequest) -> Response;

    /// Path parameter: `exam`.
    async fn prepare_exam(&self, request: RouteRequest) -> Response;

    /// Path parameter: `exam`.
    async fn take_test(&self, request: RouteRequest) -> Response;
}

pub type SharedController = Arc<dyn Controller>;

/// An inbound request together with the path parameters its route matched.
///
/// `RouteRequest` is `Send + Sync`, so implementors may hold `&RouteRequest`
/// across an `.await`. The body is `!Sync` and sits behind a mutex until
/// [`RouteRequest::into_request`] hands it back.
#[derive(Debug)]
pub struct RouteRequest {
    parts: Parts,
    body: Mutex<Body>,
    params: HashMap<String, String>,
}

impl RouteRequest {
    pub fn new(request: Request, params: HashMap<String, String>) -> Self {
        let (parts, body) = request.into_parts();
        Self { parts, body: Mutex::new(body), params }
    }

    /// Path parameter by its template name, e.g. `id` for `/get_test_id/:id`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Query-string value by name. A malformed query string reads as empty.
    pub fn query_param(&self, name: &str) -> Option<String> {
        Query::<HashMap<String, String>>::try_from_uri(&self.parts.uri)
            .ok()
            .and_then(|Query(mut query)| query.remove(name))
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    /// Reassembles the original request, body included.
    pub fn into_request(self) -> Request {
        let body = self.body.into_inner().unwrap_or_else(PoisonError::into_inner);
        Request::from_parts(self.parts, body)
    }
}
