use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::Date;
use uuid::Uuid;

use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{
    BookId, DueDate, Loan, LoanDate, LoanId, LoanStatus, PenaltyAmount, ReturnDate, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresLoanRepository;

#[async_trait::async_trait]
impl LoanQuery for PostgresLoanRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        PgLoanInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_all(con).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_by_user_id(con, user_id).await
    }

    async fn find_by_book_id(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_by_book_id(con, book_id).await
    }
}

#[async_trait::async_trait]
impl LoanModifier for PostgresLoanRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::create(con, loan).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::update(con, loan).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        loan_id: &LoanId,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::delete(con, loan_id).await
    }
}

#[derive(sqlx::FromRow)]
struct LoanRow {
    id: Uuid,
    book_id: Uuid,
    user_id: Uuid,
    loan_date: Date,
    due_date: Date,
    return_date: Option<Date>,
    status: String,
    penalty_amount: Decimal,
}

impl TryFrom<LoanRow> for Loan {
    type Error = error_stack::Report<KernelError>;

    fn try_from(value: LoanRow) -> Result<Self, Self::Error> {
        let status = value.status.parse::<LoanStatus>()?;
        Ok(Loan::new(
            LoanId::new(value.id),
            BookId::new(value.book_id),
            UserId::new(value.user_id),
            LoanDate::new(value.loan_date),
            DueDate::new(value.due_date),
            value.return_date.map(ReturnDate::new),
            status,
            PenaltyAmount::new(value.penalty_amount),
        ))
    }
}

fn collect(rows: Vec<LoanRow>) -> error_stack::Result<Vec<Loan>, KernelError> {
    rows.into_iter().map(Loan::try_from).collect()
}

pub(in crate::database) struct PgLoanInternal;

impl PgLoanInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, loan_date, due_date, return_date, status, penalty_amount
            FROM loans
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Loan::try_from).transpose()
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, loan_date, due_date, return_date, status, penalty_amount
            FROM loans
            ORDER BY seq
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        collect(rows)
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, loan_date, due_date, return_date, status, penalty_amount
            FROM loans
            WHERE user_id = $1
            ORDER BY seq
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        collect(rows)
    }

    async fn find_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, user_id, loan_date, due_date, return_date, status, penalty_amount
            FROM loans
            WHERE book_id = $1
            ORDER BY seq
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        collect(rows)
    }

    async fn create(con: &mut PgConnection, loan: &Loan) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO loans (id, book_id, user_id, loan_date, due_date, return_date, status, penalty_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.book_id().as_ref())
        .bind(loan.user_id().as_ref())
        .bind(loan.loan_date().as_ref())
        .bind(loan.due_date().as_ref())
        .bind(loan.return_date().as_ref().map(AsRef::<Date>::as_ref))
        .bind(loan.status().as_str())
        .bind(loan.penalty_amount().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(id = %loan.id().as_ref(), "inserted loan row");
        Ok(())
    }

    async fn update(con: &mut PgConnection, loan: &Loan) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE loans
            SET book_id = $2, user_id = $3, loan_date = $4, due_date = $5,
                return_date = $6, status = $7, penalty_amount = $8
            WHERE id = $1
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.book_id().as_ref())
        .bind(loan.user_id().as_ref())
        .bind(loan.loan_date().as_ref())
        .bind(loan.due_date().as_ref())
        .bind(loan.return_date().as_ref().map(AsRef::<Date>::as_ref))
        .bind(loan.status().as_str())
        .bind(loan.penalty_amount().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn delete(con: &mut PgConnection, loan_id: &LoanId) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM loans
            WHERE id = $1
            "#,
        )
        .bind(loan_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
