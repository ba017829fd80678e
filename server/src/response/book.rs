use application::transfer::BookDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: Uuid,
    title: String,
    author: String,
    isbn: String,
    published_year: i32,
    description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        let BookDto {
            id,
            title,
            author,
            isbn,
            published_year,
            description,
            created_at,
            updated_at,
        } = value;
        Self {
            id,
            title,
            author,
            isbn,
            published_year,
            description,
            created_at,
            updated_at,
        }
    }
}

pub struct BookPresenter;

impl Exhaust<()> for BookPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = axum::Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        axum::Json::from(result)
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use application::transfer::BookDto;

    use crate::controller::Exhaust;
    use crate::response::BookPresenter;

    #[test]
    fn renders_camel_case_with_rfc3339_timestamps() {
        let dto = BookDto {
            id: Uuid::nil(),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "ISBN-1".to_string(),
            published_year: 1965,
            description: None,
            created_at: datetime!(2024-01-01 09:30 UTC),
            updated_at: datetime!(2024-01-02 09:30 UTC),
        };
        let json = serde_json::to_value(BookPresenter.emit(dto)).unwrap();
        assert_eq!(json["publishedYear"], 1965);
        assert_eq!(json["createdAt"], "2024-01-01T09:30:00Z");
        assert_eq!(json["updatedAt"], "2024-01-02T09:30:00Z");
        assert!(json["description"].is_null());
    }
}
