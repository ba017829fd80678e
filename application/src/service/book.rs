use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDescription, BookId, BookIsbn, BookTitle, PublishedYear,
};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

fn not_found(id: &BookId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("Book with id {} not found", id.as_ref()))
}

fn require_text(field: &str, value: &str) -> error_stack::Result<(), KernelError> {
    if value.trim().is_empty() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("{field} is required")));
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        Ok(BookDto::from(book))
    }

    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self.book_query().find_all(&mut connection).await?;

        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier + DependOnClock
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        require_text("title", &dto.title)?;
        require_text("author", &dto.author)?;
        require_text("isbn", &dto.isbn)?;
        let published_year = PublishedYear::new(dto.published_year);
        if !published_year.is_plausible() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Invalid published year {}", dto.published_year)));
        }

        let mut connection = self.database_connection().transact().await?;

        // Advisory only. A concurrent insert can still slip in between this
        // lookup and `create`, in which case the store rejects it as Conflict.
        let isbn = BookIsbn::new(dto.isbn);
        if self
            .book_query()
            .find_by_isbn(&mut connection, &isbn)
            .await?
            .is_some()
        {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Book with ISBN {} already exists", isbn.as_ref())));
        }

        let book = Book::create(
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            isbn,
            published_year,
            dto.description.map(BookDescription::new),
            self.clock().now(),
        );
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::info!(id = %book.id().as_ref(), isbn = %book.isbn().as_ref(), "book created");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnClock
{
}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier + DependOnClock
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let mut book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        book.merge(
            dto.title.map(BookTitle::new),
            dto.author.map(BookAuthor::new),
            dto.description.map(BookDescription::new),
            self.clock().now(),
        );
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::info!(id = %id.as_ref(), "book updated");
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnClock
{
}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Loans referencing the book are left untouched.
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        if self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(not_found(&id));
        }
        self.book_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(id = %id.as_ref(), "book deleted");
        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnBookQuery + DependOnBookModifier {}
