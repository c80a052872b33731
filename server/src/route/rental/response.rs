use crate::controller::Exhaust;
use application::transfer::RentalDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    opened_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    ended_at: Option<OffsetDateTime>,
    user_id: Uuid,
    closed: bool,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            opened_at: value.opened_at,
            ended_at: value.ended_at,
            user_id: value.user_id,
            closed: value.closed,
        }
    }
}

impl IntoResponse for RentalResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug)]
pub struct CreatedResponse(RentalResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<RentalDto> for Presenter {
    type To = RentalResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        RentalResponse::from(input)
    }
}

impl Exhaust<Vec<RentalDto>> for Presenter {
    type To = Json<Vec<RentalResponse>>;
    fn emit(&self, input: Vec<RentalDto>) -> Self::To {
        Json(input.into_iter().map(RentalResponse::from).collect())
    }
}

pub struct CreatedPresenter;

impl Exhaust<RentalDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        CreatedResponse(RentalResponse::from(input))
    }
}
