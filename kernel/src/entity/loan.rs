mod date;
mod id;
mod penalty;
mod status;

pub use self::{date::*, id::*, penalty::*, status::*};
use crate::entity::BookId;
use destructure::Destructure;
use uuid::Uuid;
use vodca::References;

/// A single lending of a book to a user.
///
/// `book_id` and `user_id` are plain references into other services and are
/// never checked for existence.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Loan {
    id: LoanId,
    book_id: BookId,
    user_id: UserId,
    loan_date: LoanDate,
    due_date: DueDate,
    return_date: Option<ReturnDate>,
    status: LoanStatus,
    penalty_amount: PenaltyAmount,
}

impl Loan {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LoanId,
        book_id: BookId,
        user_id: UserId,
        loan_date: LoanDate,
        due_date: DueDate,
        return_date: Option<ReturnDate>,
        status: LoanStatus,
        penalty_amount: PenaltyAmount,
    ) -> Self {
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

    pub fn open(book_id: BookId, user_id: UserId, loan_date: LoanDate, due_date: DueDate) -> Self {
        Self::new(
            LoanId::new(Uuid::new_v4()),
            book_id,
            user_id,
            loan_date,
            due_date,
            None,
            LoanStatus::Active,
            PenaltyAmount::zero(),
        )
    }

    /// Every supplied value replaces the current one as is.
    pub fn amend(
        &mut self,
        book_id: Option<BookId>,
        user_id: Option<UserId>,
        loan_date: Option<LoanDate>,
        due_date: Option<DueDate>,
    ) {
        if let Some(book_id) = book_id {
            self.book_id = book_id;
        }
        if let Some(user_id) = user_id {
            self.user_id = user_id;
        }
        if let Some(loan_date) = loan_date {
            self.loan_date = loan_date;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }
    }

    /// The only way a loan reaches `Returned`. Repeating it moves the return date.
    pub fn mark_returned(&mut self, date: ReturnDate) {
        self.return_date = Some(date);
        self.status = LoanStatus::Returned;
    }

    pub fn is_returned(&self) -> bool {
        self.status == LoanStatus::Returned
    }
}
