use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

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

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        ErrorStatus(Report::new(KernelError::BadRequest).attach_printable(rejection.body_text()))
    }
}

impl From<PathRejection> for ErrorStatus {
    fn from(rejection: PathRejection) -> Self {
        ErrorStatus(Report::new(KernelError::BadRequest).attach_printable(rejection.body_text()))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    name: &'static str,
    message: String,
}

fn status_of(error: &KernelError) -> StatusCode {
    match error {
        KernelError::NotFound(_) => StatusCode::NOT_FOUND,
        KernelError::PendentRental | KernelError::MovieInRental | KernelError::RentalClosed => {
            StatusCode::CONFLICT
        }
        KernelError::InsufficientAge => StatusCode::FORBIDDEN,
        KernelError::InvalidRequest | KernelError::BadRequest => StatusCode::BAD_REQUEST,
        KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
        KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let context = self.0.current_context();
        let status = status_of(context);
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = ErrorBody {
            name: context.kind(),
            message: context.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
