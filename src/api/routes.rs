use std::collections::HashMap;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::api::controller::{Controller, RouteRequest, SharedController};

/// A controller operation reachable by `GET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAllGroups,
    GetAllTests,
    CreateTestGroup,
    GetTestId,
    GetTestStudent,
    PrepareExam,
    TakeTest,
}

/// Every registered route, in registration order.
pub const ROUTE_TABLE: [Operation; 7] = [
    Operation::GetAllGroups,
    Operation::GetAllTests,
    Operation::CreateTestGroup,
    Operation::GetTestId,
    Operation::GetTestStudent,
    Operation::PrepareExam,
    Operation::TakeTest,
];

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::GetAllGroups => "get_all_groups",
            Operation::GetAllTests => "get_all_tests",
            Operation::CreateTestGroup => "create_test_group",
            Operation::GetTestId => "get_test_id",
            Operation::GetTestStudent => "get_test_student",
            Operation::PrepareExam => "prepare_exam",
            Operation::TakeTest => "take_test",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Operation::GetAllGroups => "/get_all_groups",
            Operation::GetAllTests => "/get_all_tests",
            Operation::CreateTestGroup => "/create_test_group/:generator",
            Operation::GetTestId => "/get_test_id/:id",
            Operation::GetTestStudent => "/get_test_student/:name",
            Operation::PrepareExam => "/prepare_exam/:exam",
            Operation::TakeTest => "/take_test/:exam",
        }
    }

    pub fn param(self) -> Option<&'static str> {
        match self {
            Operation::GetAllGroups | Operation::GetAllTests => None,
            Operation::CreateTestGroup => Some("generator"),
            Operation::GetTestId => Some("id"),
            Operation::GetTestStudent => Some("name"),
            Operation::PrepareExam | Operation::TakeTest => Some("exam"),
        }
    }

    async fn dispatch(self, controller: &dyn Controller, request: RouteRequest) -> Response {
        match self {
            Operation::GetAllGroups => controller.get_all_groups(request).await,
            Operation::GetAllTests => controller.get_all_tests(request).await,
            Operation::CreateTestGroup => controller.create_test_group(request).await,
            Operation::GetTestId => controller.get_test_id(request).await,
            Operation::GetTestStudent => controller.get_test_student(request).await,
            Operation::PrepareExam => controller.prepare_exam(request).await,
            Operation::TakeTest => controller.take_test(request).await,
        }
    }
}

/// Builds a fresh route table bound to `controller`.
///
/// Each call returns an independent router; nothing is shared between the
/// tables of two calls except the controller handle itself.
pub fn routes(controller: SharedController) -> Router {
    let router: Router<SharedController> =
        ROUTE_TABLE.into_iter().fold(Router::new(), |router, operation| {
            router.route(
                operation.path(),
                get(
                    move |controller: State<SharedController>,
                          params: Result<Path<HashMap<String, String>>, PathRejection>,
                          request: Request| forward(operation, controller, params, request),
                ),
            )
        });

    router.with_state(controller)
}

async fn forward(
    operation: Operation,
    State(controller): State<SharedController>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    request: Request,
) -> Response {
    // A segment that does not decode is answered by axum's own rejection.
    let params = match (operation.param(), params) {
        (None, _) => HashMap::new(),
        (Some(_), Ok(Path(params))) => params,
        (Some(_), Err(rejection)) => return rejection.into_response(),
    };
    tracing::debug!(operation = operation.name(), "dispatching to controller");
    operation.dispatch(controller.as_ref(), RouteRequest::new(request, params)).await
}
