use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use validator::Validate;

use crate::api::controller::{Controller, RouteRequest};
use crate::api::errors::ApiError;
use crate::db::models::{Group, Test};
use crate::db::Ledger;
use crate::repositories;
use crate::schemas::ledger::{keyed, ExamSelector, GroupCreate, KeyedRecord, TakeTestQuery};

/// Default controller, answering every route from the in-memory ledger.
#[derive(Clone)]
pub(crate) struct LedgerController {
    ledger: Ledger,
}

impl LedgerController {
    pub(crate) fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    async fn list_groups(&self) -> Json<Vec<KeyedRecord<Group>>> {
        Json(keyed(repositories::groups::list(&self.ledger).await))
    }

    async fn list_tests(&self) -> Json<Vec<KeyedRecord<Test>>> {
        Json(keyed(repositories::test_records::list(&self.ledger).await))
    }

    async fn create_group(
        &self,
        payload: GroupCreate,
    ) -> Result<(StatusCode, Json<KeyedRecord<Group>>), ApiError> {
        payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let group_desc = format!("Description for {}", payload.generator);
        let created = repositories::groups::create(
            &self.ledger,
            repositories::groups::CreateGroup {
                group_name: &payload.generator,
                group_desc: &group_desc,
            },
        )
        .await;

        tracing::info!(key = %created.0, group_name = %created.1.group_name, "test group created");
        Ok((StatusCode::CREATED, Json(created.into())))
    }

    async fn find_group(&self, key: String) -> Result<Json<Group>, ApiError> {
        repositories::groups::find_by_key(&self.ledger, &key)
            .await
            .map(Json)
            .ok_or_else(|| ApiError::NotFound("Could not locate group".to_string()))
    }

    async fn tests_for_student(
        &self,
        student: String,
    ) -> Result<Json<Vec<KeyedRecord<Test>>>, ApiError> {
        let rows = repositories::test_records::list_for_student(&self.ledger, &student).await;
        if rows.is_empty() {
            return Err(ApiError::NotFound("No tests for student".to_string()));
        }
        Ok(Json(keyed(rows)))
    }

    async fn prepare(
        &self,
        selector: ExamSelector,
    ) -> Result<(StatusCode, Json<KeyedRecord<Test>>), ApiError> {
        selector.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let Some(created) =
            repositories::test_records::create_prepared(&self.ledger, &selector.exam).await
        else {
            return Err(ApiError::Conflict(format!("Exam '{}' is already prepared", selector.exam)));
        };

        tracing::info!(key = %created.0, exam = %selector.exam, "exam prepared");
        Ok((StatusCode::CREATED, Json(created.into())))
    }

    async fn take(
        &self,
        selector: ExamSelector,
        query: TakeTestQuery,
    ) -> Result<(StatusCode, Json<KeyedRecord<Test>>), ApiError> {
        selector.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
        query.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

        if repositories::test_records::find_prepared(&self.ledger, &selector.exam).await.is_none() {
            return Err(ApiError::NotFound(format!("Exam '{}' is not prepared", selector.exam)));
        }

        let created =
            repositories::test_records::create_taken(&self.ledger, &selector.exam, &query.student)
                .await;

        tracing::info!(
            key = %created.0,
            exam = %selector.exam,
            student = %query.student,
            "test taken"
        );
        Ok((StatusCode::CREATED, Json(created.into())))
    }
}

#[async_trait]
impl Controller for LedgerController {
    async fn get_all_groups(&self, _request: RouteRequest) -> Response {
        self.list_groups().await.into_response()
    }

    async fn get_all_tests(&self, _request: RouteRequest) -> Response {
        self.list_tests().await.into_response()
    }

    async fn create_test_group(&self, request: RouteRequest) -> Response {
        match required_param(&request, "generator") {
            Ok(generator) => self.create_group(GroupCreate { generator }).await.into_response(),
            Err(err) => err.into_response(),
        }
    }

    async fn get_test_id(&self, request: RouteRequest) -> Response {
        match required_param(&request, "id") {
            Ok(key) => self.find_group(key).await.into_response(),
            Err(err) => err.into_response(),
        }
    }

    async fn get_test_student(&self, request: RouteRequest) -> Response {
        match required_param(&request, "name") {
            Ok(student) => self.tests_for_student(student).await.into_response(),
            Err(err) => err.into_response(),
        }
    }

    async fn prepare_exam(&self, request: RouteRequest) -> Response {
        match required_param(&request, "exam") {
            Ok(exam) => self.prepare(ExamSelector { exam }).await.into_response(),
            Err(err) => err.into_response(),
        }
    }

    async fn take_test(&self, request: RouteRequest) -> Response {
        let selector = required_param(&request, "exam").map(|exam| ExamSelector { exam });
        let student = request.query_param("student").ok_or_else(|| {
            ApiError::BadRequest("missing query parameter 'student'".to_string())
        });
        match (selector, student) {
            (Ok(selector), Ok(student)) => {
                self.take(selector, TakeTestQuery { student }).await.into_response()
            }
            (Err(err), _) | (_, Err(err)) => err.into_response(),
        }
    }
}

fn required_param(request: &RouteRequest, name: &str) -> Result<String, ApiError> {
    request
        .param(name)
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest(format!("missing path parameter '{name}'")))
}
