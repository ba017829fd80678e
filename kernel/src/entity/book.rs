mod id;
mod isbn;
mod published_year;
mod title;

pub use self::{id::*, isbn::*, published_year::*, title::*};
use crate::entity::common::{CreatedAt, UpdatedAt};
use destructure::Destructure;
use time::OffsetDateTime;
use uuid::Uuid;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: BookIsbn,
    published_year: PublishedYear,
    description: Option<BookDescription>,
    created_at: CreatedAt<Book>,
    updated_at: UpdatedAt<Book>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        isbn: BookIsbn,
        published_year: PublishedYear,
        description: Option<BookDescription>,
        created_at: CreatedAt<Book>,
        updated_at: UpdatedAt<Book>,
    ) -> Self {
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

    /// Stamps a fresh id and sets both timestamps to `now`.
    pub fn create(
        title: BookTitle,
        author: BookAuthor,
        isbn: BookIsbn,
        published_year: PublishedYear,
        description: Option<BookDescription>,
        now: OffsetDateTime,
    ) -> Self {
        Self::new(
            BookId::new(Uuid::new_v4()),
            title,
            author,
            isbn,
            published_year,
            description,
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    /// Partial update. Title and author are only replaced by non-empty values,
    /// description by any supplied value (an empty one included).
    /// Isbn and published year never change here.
    pub fn merge(
        &mut self,
        title: Option<BookTitle>,
        author: Option<BookAuthor>,
        description: Option<BookDescription>,
        now: OffsetDateTime,
    ) {
        if let Some(title) = title.filter(|title| !title.as_ref().is_empty()) {
            self.title = title;
        }
        if let Some(author) = author.filter(|author| !author.as_ref().is_empty()) {
            self.author = author;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        self.updated_at = self.updated_at.advance(now);
    }
}
