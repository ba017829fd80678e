use rust_decimal::Decimal;
use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{DestructLoan, Loan, LoanStatus};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoanDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub loan_date: Date,
    pub due_date: Date,
    pub return_date: Option<Date>,
    pub status: LoanStatus,
    pub penalty_amount: Decimal,
}

impl From<Loan> for LoanDto {
    fn from(value: Loan) -> Self {
        let DestructLoan {
            id,
            book_id,
            user_id,
            loan_date,
            due_date,
            return_date,
            status,
            penalty_amount,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            user_id: user_id.into(),
            loan_date: loan_date.into(),
            due_date: due_date.into(),
            return_date: return_date.map(Into::into),
            status,
            penalty_amount: penalty_amount.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLoanDto {
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub loan_date: Option<Date>,
    pub due_date: Date,
}

#[derive(Debug, Clone)]
pub struct GetLoanDto {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetLoansByUserDto {
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetLoansByBookDto {
    pub book_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct UpdateLoanDto {
    pub id: Uuid,
    pub book_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub loan_date: Option<Date>,
    pub due_date: Option<Date>,
    pub return_date: Option<Date>,
}

#[derive(Debug, Clone)]
pub struct DeleteLoanDto {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ReturnLoanDto {
    pub id: Uuid,
    pub return_date: Option<Date>,
}
