use std::process::{ExitCode, Termination};

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use serde::Serialize;

use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl ErrorStatus {
    pub fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Conflict => StatusCode::CONFLICT,
            KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self.0.current_context() {
            KernelError::NotFound => "not_found",
            KernelError::Conflict => "conflict",
            KernelError::Validation => "validation",
            KernelError::Timeout => "timeout",
            KernelError::Internal => "internal",
        }
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

fn rejected(reason: String) -> ErrorStatus {
    ErrorStatus(Report::new(KernelError::Validation).attach_printable(reason))
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        rejected(rejection.body_text())
    }
}

impl From<PathRejection> for ErrorStatus {
    fn from(rejection: PathRejection) -> Self {
        rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ErrorStatus {
    fn from(rejection: QueryRejection) -> Self {
        rejected(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        (status, Json(ErrorBody { error: self.kind() })).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::extract::{Path, Query};
    use axum::http::{header, Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use axum_extra::extract::WithRejection;
    use error_stack::Report;
    use tower::ServiceExt;
    use uuid::Uuid;

    use kernel::KernelError;

    use super::ErrorStatus;
    use crate::controller::TryIntake;
    use crate::request::{CreateLoanRequest, LoanTransformer, ReturnLoanQuery};

    #[test]
    fn maps_kernel_errors_to_status() {
        let cases = [
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::Conflict, StatusCode::CONFLICT),
            (KernelError::Validation, StatusCode::BAD_REQUEST),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            let response = ErrorStatus::from(Report::new(error)).into_response();
            assert_eq!(response.status(), status);
        }
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/loans/:id",
                get(
                    |WithRejection(Path(id), _): WithRejection<Path<Uuid>, ErrorStatus>| async move {
                        id.to_string()
                    },
                ),
            )
            .route(
                "/loans/:id/return",
                post(
                    |WithRejection(Path(_id), _): WithRejection<Path<Uuid>, ErrorStatus>,
                     WithRejection(Query(_query), _): WithRejection<
                        Query<ReturnLoanQuery>,
                        ErrorStatus,
                    >| async move { StatusCode::OK },
                ),
            )
            .route(
                "/loans",
                post(
                    |WithRejection(Json(req), _): WithRejection<
                        Json<CreateLoanRequest>,
                        ErrorStatus,
                    >| async move {
                        TryIntake::emit(&LoanTransformer, req)
                            .map(|_| StatusCode::CREATED)
                            .map_err(ErrorStatus::from)
                    },
                ),
            )
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn json(body: &str) -> Request<Body> {
        Request::post("/loans")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_path_id_is_bad_request() {
        let (status, body) = send(
            Request::get("/loans/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"validation"}"#);

        let id = Uuid::new_v4();
        let (status, body) = send(
            Request::get(format!("/loans/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, id.to_string());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, body) = send(json(r#"{"bookId": "#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"validation"}"#);

        let (status, _) = send(json(
            r#"{"bookId":"not-a-uuid","userId":"also-not","dueDate":"2024-01-10"}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_required_field_is_bad_request() {
        let body = format!(
            r#"{{"bookId":"{}","userId":"{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let (status, body) = send(json(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"validation"}"#);
    }

    #[tokio::test]
    async fn return_query_accepts_blank_and_rejects_garbage() {
        let id = Uuid::new_v4();
        for (query, expected) in [
            ("", StatusCode::OK),
            ("?returnDate=", StatusCode::OK),
            ("?returnDate=2024-01-15", StatusCode::OK),
            ("?returnDate=yesterday", StatusCode::BAD_REQUEST),
        ] {
            let (status, _) = send(
                Request::post(format!("/loans/{id}/return{query}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
            assert_eq!(status, expected, "{query}");
        }
    }
}
