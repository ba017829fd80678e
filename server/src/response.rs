use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub use self::{book::*, loan::*};

mod book;
mod loan;

/// Answers with `201 Created` around whatever the inner response renders.
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, self.0).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use time::macros::datetime;
    use uuid::Uuid;

    use application::transfer::BookDto;

    use crate::controller::Exhaust;
    use crate::response::{BookPresenter, Created, LoanPresenter};

    #[test]
    fn created_answers_201() {
        let dto = BookDto {
            id: Uuid::new_v4(),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "ISBN-1".to_string(),
            published_year: 1965,
            description: None,
            created_at: datetime!(2024-01-01 00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00 UTC),
        };
        let response = Created(BookPresenter.emit(dto)).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn deletions_answer_204() {
        assert_eq!(
            BookPresenter.emit(()).into_response().status(),
            StatusCode::NO_CONTENT
        );
        assert_eq!(
            LoanPresenter.emit(()).into_response().status(),
            StatusCode::NO_CONTENT
        );
    }
}
