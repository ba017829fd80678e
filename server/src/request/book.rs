use application::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use error_stack::Report;
use kernel::KernelError;
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::{Intake, TryIntake};
use crate::request::required;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    published_year: Option<i32>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    description: Option<String>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: Uuid,
}

impl GetBookRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: Uuid,
}

impl DeleteBookRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct BookTransformer;

impl TryIntake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        Ok(CreateBookDto {
            title: required("title", input.title)?,
            author: required("author", input.author)?,
            isbn: required("isbn", input.isbn)?,
            published_year: required("publishedYear", input.published_year)?,
            description: input.description,
        })
    }
}

impl Intake<(Uuid, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (Uuid, UpdateBookRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookDto {
            id,
            title: input.title,
            author: input.author,
            description: input.description,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::controller::TryIntake;
    use crate::request::{BookTransformer, CreateBookRequest};

    #[test]
    fn create_reads_camel_case_body() {
        let request: CreateBookRequest = serde_json::from_str(
            r#"{"title":"Dune","author":"Herbert","isbn":"ISBN-1","publishedYear":1965}"#,
        )
        .unwrap();
        let dto = BookTransformer.emit(request).unwrap();
        assert_eq!(dto.title, "Dune");
        assert_eq!(dto.published_year, 1965);
        assert_eq!(dto.description, None);
    }

    #[test]
    fn create_without_isbn_is_invalid() {
        let request: CreateBookRequest =
            serde_json::from_str(r#"{"title":"Dune","author":"Herbert","publishedYear":1965}"#)
                .unwrap();
        let report = BookTransformer.emit(request).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
    }
}
