use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnLoanQuery, LoanQuery};
use kernel::interface::update::{DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{
    BookId, DueDate, Loan, LoanDate, LoanId, ReturnDate, UserId,
};
use kernel::KernelError;

use crate::transfer::{
    CreateLoanDto, DeleteLoanDto, GetLoanDto, GetLoansByBookDto, GetLoansByUserDto, LoanDto,
    ReturnLoanDto, UpdateLoanDto,
};

fn not_found(id: &LoanId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("Loan not found with id: {}", id.as_ref()))
}

/// Shared by the explicit return operation and by updates carrying a return date.
fn apply_return(loan: &mut Loan, date: ReturnDate) {
    if let Some(previous) = loan.return_date() {
        tracing::warn!(
            id = %loan.id().as_ref(),
            previous = %previous.as_ref(),
            date = %date.as_ref(),
            "loan returned again; overwriting return date"
        );
    }
    loan.mark_returned(date);
}

async fn find_loan<T: DependOnLoanQuery + ?Sized>(
    module: &T,
    con: &mut <T::DatabaseConnection as DatabaseConnection>::Transaction,
    id: &LoanId,
) -> error_stack::Result<Loan, KernelError> {
    module
        .loan_query()
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| not_found(id))
}

#[async_trait::async_trait]
pub trait GetLoanService: 'static + Sync + Send + DependOnLoanQuery {
    async fn get_loan(&self, dto: GetLoanDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let loan = find_loan(self, &mut connection, &LoanId::new(dto.id)).await?;

        Ok(LoanDto::from(loan))
    }

    async fn get_all_loans(&self) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let loans = self.loan_query().find_all(&mut connection).await?;

        Ok(loans.into_iter().map(LoanDto::from).collect())
    }

    async fn get_loans_by_user(
        &self,
        dto: GetLoansByUserDto,
    ) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let loans = self
            .loan_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;

        Ok(loans.into_iter().map(LoanDto::from).collect())
    }

    async fn get_loans_by_book(
        &self,
        dto: GetLoansByBookDto,
    ) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let loans = self
            .loan_query()
            .find_by_book_id(&mut connection, &book_id)
            .await?;

        Ok(loans.into_iter().map(LoanDto::from).collect())
    }
}

impl<T> GetLoanService for T where T: DependOnLoanQuery {}

#[async_trait::async_trait]
pub trait CreateLoanService:
    'static + Sync + Send + DependOnLoanModifier + DependOnClock
{
    /// Neither the book nor the user is looked up, and the due date is not
    /// compared with the loan date.
    async fn create_loan(&self, dto: CreateLoanDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let loan_date = dto.loan_date.unwrap_or_else(|| self.clock().today());
        let loan = Loan::open(
            BookId::new(dto.book_id),
            UserId::new(dto.user_id),
            LoanDate::new(loan_date),
            DueDate::new(dto.due_date),
        );
        self.loan_modifier().create(&mut connection, &loan).await?;
        connection.commit().await?;

        tracing::info!(
            id = %loan.id().as_ref(),
            book_id = %loan.book_id().as_ref(),
            user_id = %loan.user_id().as_ref(),
            "loan created"
        );
        Ok(LoanDto::from(loan))
    }
}

impl<T> CreateLoanService for T where T: DependOnLoanModifier + DependOnClock {}

#[async_trait::async_trait]
pub trait UpdateLoanService:
    'static + Sync + Send + DependOnLoanQuery + DependOnLoanModifier
{
    async fn update_loan(&self, dto: UpdateLoanDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = LoanId::new(dto.id);
        let mut loan = find_loan(self, &mut connection, &id).await?;

        loan.amend(
            dto.book_id.map(BookId::new),
            dto.user_id.map(UserId::new),
            dto.loan_date.map(LoanDate::new),
            dto.due_date.map(DueDate::new),
        );
        if let Some(return_date) = dto.return_date {
            apply_return(&mut loan, ReturnDate::new(return_date));
        }
        self.loan_modifier().update(&mut connection, &loan).await?;
        connection.commit().await?;

        tracing::info!(id = %id.as_ref(), status = %loan.status(), "loan updated");
        Ok(LoanDto::from(loan))
    }
}

impl<T> UpdateLoanService for T where T: DependOnLoanQuery + DependOnLoanModifier {}

#[async_trait::async_trait]
pub trait DeleteLoanService:
    'static + Sync + Send + DependOnLoanQuery + DependOnLoanModifier
{
    async fn delete_loan(&self, dto: DeleteLoanDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = LoanId::new(dto.id);
        find_loan(self, &mut connection, &id).await?;
        self.loan_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(id = %id.as_ref(), "loan deleted");
        Ok(())
    }
}

impl<T> DeleteLoanService for T where T: DependOnLoanQuery + DependOnLoanModifier {}

#[async_trait::async_trait]
pub trait ReturnLoanService:
    'static + Sync + Send + DependOnLoanQuery + DependOnLoanModifier + DependOnClock
{
    async fn return_loan(&self, dto: ReturnLoanDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = LoanId::new(dto.id);
        let mut loan = find_loan(self, &mut connection, &id).await?;

        let return_date = dto.return_date.unwrap_or_else(|| self.clock().today());
        apply_return(&mut loan, ReturnDate::new(return_date));
        self.loan_modifier().update(&mut connection, &loan).await?;
        connection.commit().await?;

        tracing::info!(id = %id.as_ref(), return_date = %return_date, "loan returned");
        Ok(LoanDto::from(loan))
    }
}

impl<T> ReturnLoanService for T where
    T: DependOnLoanQuery + DependOnLoanModifier + DependOnClock
{
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use kernel::prelude::entity::LoanStatus;
    use kernel::KernelError;

    use crate::service::test::MockModule;
    use crate::service::{
        CreateLoanService, DeleteLoanService, GetLoanService, ReturnLoanService,
        UpdateLoanService,
    };
    use crate::transfer::{
        CreateLoanDto, DeleteLoanDto, GetLoanDto, GetLoansByBookDto, GetLoansByUserDto,
        ReturnLoanDto, UpdateLoanDto,
    };

    fn request(book_id: Uuid, user_id: Uuid) -> CreateLoanDto {
        CreateLoanDto {
            book_id,
            user_id,
            loan_date: None,
            due_date: date!(2024 - 01 - 10),
        }
    }

    #[tokio::test]
    async fn create_defaults_to_today() -> error_stack::Result<(), KernelError> {
        let module = MockModule::new(datetime!(2024-01-01 09:30 UTC));
        let (book_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());

        let created = module.create_loan(request(book_id, user_id)).await?;
        assert_eq!(created.loan_date, date!(2024 - 01 - 01));
        assert_eq!(created.due_date, date!(2024 - 01 - 10));
        assert_eq!(created.status, LoanStatus::Active);
        assert_eq!(created.penalty_amount, Decimal::ZERO);
        assert_eq!(created.penalty_amount.to_string(), "0.00");
        assert_eq!(created.return_date, None);

        let fetched = module.get_loan(GetLoanDto { id: created.id }).await?;
        assert_eq!(fetched, created);
        assert_eq!(fetched.book_id, book_id);
        assert_eq!(fetched.user_id, user_id);
        Ok(())
    }

    #[tokio::test]
    async fn create_keeps_supplied_loan_date() -> error_stack::Result<(), KernelError> {
        let module = MockModule::new(datetime!(2024-01-01 09:30 UTC));
        let mut dto = request(Uuid::new_v4(), Uuid::new_v4());
        dto.loan_date = Some(date!(2023 - 12 - 24));
        // due before loan is accepted as is
        dto.due_date = date!(2023 - 12 - 01);

        let created = module.create_loan(dto).await?;
        assert_eq!(created.loan_date, date!(2023 - 12 - 24));
        assert_eq!(created.due_date, date!(2023 - 12 - 01));
        Ok(())
    }

    #[tokio::test]
    async fn late_return_scenario() -> error_stack::Result<(), KernelError> {
        let module = MockModule::new(datetime!(2024-01-01 12:00 UTC));
        let created = module
            .create_loan(request(Uuid::new_v4(), Uuid::new_v4()))
            .await?;
        assert_eq!(created.status, LoanStatus::Active);

        module.set_time(datetime!(2024-01-15 12:00 UTC));
        let returned = module
            .return_loan(ReturnLoanDto {
                id: created.id,
                return_date: None,
            })
            .await?;
        assert_eq!(returned.status, LoanStatus::Returned);
        assert_eq!(returned.return_date, Some(date!(2024 - 01 - 15)));
        assert_eq!(returned.penalty_amount, Decimal::ZERO);

        let stored = module.get_loan(GetLoanDto { id: created.id }).await?;
        assert_eq!(stored, returned);
        Ok(())
    }

    #[tokio::test]
    async fn return_with_explicit_date_and_again() -> error_stack::Result<(), KernelError> {
        let module = MockModule::new(datetime!(2024-01-01 12:00 UTC));
        let created = module
            .create_loan(request(Uuid::new_v4(), Uuid::new_v4()))
            .await?;

        let returned = module
            .return_loan(ReturnLoanDto {
                id: created.id,
                return_date: Some(date!(2024 - 01 - 05)),
            })
            .await?;
        assert_eq!(returned.return_date, Some(date!(2024 - 01 - 05)));
        assert_eq!(returned.status, LoanStatus::Returned);

        let again = module
            .return_loan(ReturnLoanDto {
                id: created.id,
                return_date: Some(date!(2024 - 01 - 07)),
            })
            .await?;
        assert_eq!(again.return_date, Some(date!(2024 - 01 - 07)));
        assert_eq!(again.status, LoanStatus::Returned);
        Ok(())
    }

    #[tokio::test]
    async fn update_with_return_date_matches_return() -> error_stack::Result<(), KernelError> {
        let module = MockModule::new(datetime!(2024-01-01 12:00 UTC));
        let (book_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());
        let via_return = module.create_loan(request(book_id, user_id)).await?;
        let via_update = module.create_loan(request(book_id, user_id)).await?;

        let returned = module
            .return_loan(ReturnLoanDto {
                id: via_return.id,
                return_date: Some(date!(2024 - 01 - 15)),
            })
            .await?;
        let updated = module
            .update_loan(UpdateLoanDto {
                id: via_update.id,
                book_id: None,
                user_id: None,
                loan_date: None,
                due_date: None,
                return_date: Some(date!(2024 - 01 - 15)),
            })
            .await?;

        assert_eq!(updated.status, returned.status);
        assert_eq!(updated.return_date, returned.return_date);
        assert_eq!(updated.penalty_amount, returned.penalty_amount);
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_supplied_fields() -> error_stack::Result<(), KernelError> {
        let module = MockModule::new(datetime!(2024-01-01 12:00 UTC));
        let created = module
            .create_loan(request(Uuid::new_v4(), Uuid::new_v4()))
            .await?;
        let other_book = Uuid::new_v4();

        let updated = module
            .update_loan(UpdateLoanDto {
                id: created.id,
                book_id: Some(other_book),
                user_id: None,
                loan_date: None,
                due_date: Some(date!(2024 - 02 - 01)),
                return_date: None,
            })
            .await?;
        assert_eq!(updated.book_id, other_book);
        assert_eq!(updated.user_id, created.user_id);
        assert_eq!(updated.loan_date, created.loan_date);
        assert_eq!(updated.due_date, date!(2024 - 02 - 01));
        assert_eq!(updated.status, LoanStatus::Active);
        assert_eq!(updated.return_date, None);
        Ok(())
    }

    #[tokio::test]
    async fn filters_by_user_and_book() -> error_stack::Result<(), KernelError> {
        let module = MockModule::new(datetime!(2024-01-01 12:00 UTC));
        let (book_a, book_b) = (Uuid::new_v4(), Uuid::new_v4());
        let (user_a, user_b) = (Uuid::new_v4(), Uuid::new_v4());
        let first = module.create_loan(request(book_a, user_a)).await?;
        let second = module.create_loan(request(book_b, user_a)).await?;
        let third = module.create_loan(request(book_a, user_b)).await?;

        let ids = |loans: Vec<crate::transfer::LoanDto>| {
            loans.into_iter().map(|loan| loan.id).collect::<Vec<_>>()
        };

        let by_user = module
            .get_loans_by_user(GetLoansByUserDto { user_id: user_a })
            .await?;
        assert_eq!(ids(by_user), vec![first.id, second.id]);

        let by_book = module
            .get_loans_by_book(GetLoansByBookDto { book_id: book_a })
            .await?;
        assert_eq!(ids(by_book), vec![first.id, third.id]);

        let unknown = module
            .get_loans_by_book(GetLoansByBookDto {
                book_id: Uuid::new_v4(),
            })
            .await?;
        assert!(unknown.is_empty());

        assert_eq!(module.get_all_loans().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn missing_loan_is_not_found() {
        let module = MockModule::new(datetime!(2024-01-01 12:00 UTC));
        let id = Uuid::new_v4();

        let reports = [
            module.get_loan(GetLoanDto { id }).await.map(|_| ()),
            module
                .return_loan(ReturnLoanDto {
                    id,
                    return_date: None,
                })
                .await
                .map(|_| ()),
            module
                .update_loan(UpdateLoanDto {
                    id,
                    book_id: None,
                    user_id: None,
                    loan_date: None,
                    due_date: None,
                    return_date: None,
                })
                .await
                .map(|_| ()),
            module.delete_loan(DeleteLoanDto { id }).await,
        ];
        for result in reports {
            let report = result.expect_err("nothing stored");
            assert_eq!(report.current_context(), &KernelError::NotFound);
        }
    }

    #[tokio::test]
    async fn delete_then_get() -> error_stack::Result<(), KernelError> {
        let module = MockModule::new(datetime!(2024-01-01 12:00 UTC));
        let created = module
            .create_loan(request(Uuid::new_v4(), Uuid::new_v4()))
            .await?;

        module.delete_loan(DeleteLoanDto { id: created.id }).await?;

        let report = module
            .get_loan(GetLoanDto { id: created.id })
            .await
            .expect_err("deleted");
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
