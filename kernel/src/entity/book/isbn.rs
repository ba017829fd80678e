use vodca::{AsRefln, Fromln};

/// Catalog-wide unique key of a book. Kept as supplied; no checksum validation.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln)]
pub struct BookIsbn(String);

impl BookIsbn {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }
}
