use application::transfer::LoanDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::prelude::entity::LoanStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    loan_date: Date,
    due_date: Date,
    return_date: Option<Date>,
    status: LoanStatus,
    penalty_amount: Decimal,
}

impl IntoResponse for LoanResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

impl From<LoanDto> for LoanResponse {
    fn from(value: LoanDto) -> Self {
        let LoanDto {
            id,
            book_id,
            user_id,
            loan_date,
            due_date,
            return_date,
            status,
            penalty_amount,
        } = value;
        Self {
            id,
            book_id,
            user_id,
            loan_date,
            due_date,
            return_date,
            status,
            penalty_amount,
        }
    }
}

pub struct LoanPresenter;

impl Exhaust<()> for LoanPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<LoanDto> for LoanPresenter {
    type To = LoanResponse;
    fn emit(&self, input: LoanDto) -> Self::To {
        LoanResponse::from(input)
    }
}

impl Exhaust<Vec<LoanDto>> for LoanPresenter {
    type To = axum::Json<Vec<LoanResponse>>;
    fn emit(&self, input: Vec<LoanDto>) -> Self::To {
        axum::Json::from(
            input
                .into_iter()
                .map(LoanResponse::from)
                .collect::<Vec<_>>(),
        )
    }
}
