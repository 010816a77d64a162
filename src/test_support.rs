use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::api::controller::{Controller, RouteRequest, SharedController};
use crate::api::routes::routes;
use crate::db::{self, Ledger};
use crate::services::ledger_controller::LedgerController;

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<AsyncMutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(AsyncMutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("ELZA_ENV", "test");
    std::env::set_var("ELZA_HOST", "127.0.0.1");
    std::env::remove_var("ELZA_PORT");
    std::env::remove_var("ENVIRONMENT");
    std::env::remove_var("ELZA_STRICT_CONFIG");
    std::env::remove_var("ELZA_SEED_LEDGER");
    std::env::remove_var("PROJECT_NAME");
    std::env::remove_var("VERSION");
    std::env::remove_var("BACKEND_CORS_ORIGINS");
    std::env::set_var("PROMETHEUS_ENABLED", "0");
}

/// Route table over a fresh ledger, optionally seeded with the sample groups.
pub(crate) struct LedgerContext {
    pub(crate) ledger: Ledger,
    pub(crate) app: Router,
}

pub(crate) async fn setup_ledger_context(seeded: bool) -> LedgerContext {
    let ledger = Ledger::new();
    if seeded {
        db::seed(&ledger).await;
    }

    let controller: SharedController = Arc::new(LedgerController::new(ledger.clone()));
    LedgerContext { ledger, app: routes(controller) }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) operation: &'static str,
    pub(crate) params: HashMap<String, String>,
}

/// Controller that answers every operation with its own name and remembers each call.
#[derive(Clone)]
pub(crate) struct RecordingController {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    status: StatusCode,
}

impl RecordingController {
    pub(crate) fn new() -> Self {
        Self::with_status(StatusCode::OK)
    }

    pub(crate) fn with_status(status: StatusCode) -> Self {
        Self { calls: Arc::new(Mutex::new(Vec::new())), status }
    }

    pub(crate) fn shared(&self) -> SharedController {
        Arc::new(self.clone())
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|call| call.operation == operation).count()
    }

    pub(crate) fn total(&self) -> usize {
        self.calls().len()
    }

    fn record(&self, operation: &'static str, request: RouteRequest) -> Response {
        let params = request.params().clone();
        self.calls
            .lock()
            .expect("calls lock")
            .push(RecordedCall { operation, params: params.clone() });

        let mut response = (
            self.status,
            Json(serde_json::json!({ "operation": operation, "params": params })),
        )
            .into_response();
        response.headers_mut().insert("x-handled-by", HeaderValue::from_static(operation));
        response
    }
}

#[async_trait]
impl Controller for RecordingController {
    async fn get_all_groups(&self, request: RouteRequest) -> Response {
        self.record("get_all_groups", request)
    }

    async fn get_all_tests(&self, request: RouteRequest) -> Response {
        self.record("get_all_tests", request)
    }

    async fn create_test_group(&self, request: RouteRequest) -> Response {
        self.record("create_test_group", request)
    }

    async fn get_test_id(&self, request: RouteRequest) -> Response {
        self.record("get_test_id", request)
    }

    async fn get_test_student(&self, request: RouteRequest) -> Response {
        self.record("get_test_student", request)
    }

    async fn prepare_exam(&self, request: RouteRequest) -> Response {
        self.record("prepare_exam", request)
    }

    async fn take_test(&self, request: RouteRequest) -> Response {
        self.record("take_test", request)
    }
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request body")
}

pub(crate) async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}
