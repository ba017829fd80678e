use application::transfer::{
    CreateLoanDto, DeleteLoanDto, GetLoanDto, GetLoansByBookDto, GetLoansByUserDto,
    ReturnLoanDto, UpdateLoanDto,
};
use error_stack::Report;
use kernel::KernelError;
use serde::{Deserialize, Deserializer};
use time::macros::format_description;
use time::Date;
use uuid::Uuid;

use crate::controller::{Intake, TryIntake};
use crate::request::required;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    book_id: Option<Uuid>,
    user_id: Option<Uuid>,
    loan_date: Option<Date>,
    due_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoanRequest {
    book_id: Option<Uuid>,
    user_id: Option<Uuid>,
    loan_date: Option<Date>,
    due_date: Option<Date>,
    return_date: Option<Date>,
}

/// Query string of `POST /api/v1/loans/:id/return`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnLoanQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    return_date: Option<Date>,
}

/// `returnDate=` counts as not given.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map(Some)
        .map_err(serde::de::Error::custom)
}

#[derive(Debug)]
pub struct GetLoanRequest {
    id: Uuid,
}

impl GetLoanRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteLoanRequest {
    id: Uuid,
}

impl DeleteLoanRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetUserLoansRequest {
    user_id: Uuid,
}

impl GetUserLoansRequest {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[derive(Debug)]
pub struct GetBookLoansRequest {
    book_id: Uuid,
}

impl GetBookLoansRequest {
    pub fn new(book_id: Uuid) -> Self {
        Self { book_id }
    }
}

pub struct LoanTransformer;

impl TryIntake<CreateLoanRequest> for LoanTransformer {
    type To = CreateLoanDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateLoanRequest) -> Result<Self::To, Self::Error> {
        Ok(CreateLoanDto {
            book_id: required("bookId", input.book_id)?,
            user_id: required("userId", input.user_id)?,
            loan_date: input.loan_date,
            due_date: required("dueDate", input.due_date)?,
        })
    }
}

impl Intake<(Uuid, UpdateLoanRequest)> for LoanTransformer {
    type To = UpdateLoanDto;
    fn emit(&self, input: (Uuid, UpdateLoanRequest)) -> Self::To {
        let (id, input) = input;
        UpdateLoanDto {
            id,
            book_id: input.book_id,
            user_id: input.user_id,
            loan_date: input.loan_date,
            due_date: input.due_date,
            return_date: input.return_date,
        }
    }
}

impl Intake<(Uuid, ReturnLoanQuery)> for LoanTransformer {
    type To = ReturnLoanDto;
    fn emit(&self, input: (Uuid, ReturnLoanQuery)) -> Self::To {
        let (id, query) = input;
        ReturnLoanDto {
            id,
            return_date: query.return_date,
        }
    }
}

impl Intake<GetLoanRequest> for LoanTransformer {
    type To = GetLoanDto;
    fn emit(&self, input: GetLoanRequest) -> Self::To {
        GetLoanDto { id: input.id }
    }
}

impl Intake<DeleteLoanRequest> for LoanTransformer {
    type To = DeleteLoanDto;
    fn emit(&self, input: DeleteLoanRequest) -> Self::To {
        DeleteLoanDto { id: input.id }
    }
}

impl Intake<GetUserLoansRequest> for LoanTransformer {
    type To = GetLoansByUserDto;
    fn emit(&self, input: GetUserLoansRequest) -> Self::To {
        GetLoansByUserDto {
            user_id: input.user_id,
        }
    }
}

impl Intake<GetBookLoansRequest> for LoanTransformer {
    type To = GetLoansByBookDto;
    fn emit(&self, input: GetBookLoansRequest) -> Self::To {
        GetLoansByBookDto {
            book_id: input.book_id,
        }
    }
}
