use thiserror::Error;

/// Error for catalog operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookError {
    #[error("Invalid book: {0}")]
    InvalidBook(String),

    #[error("Database is empty")]
    CatalogEmpty,

    #[error("No book with this ISBN: {0} found")]
    NotFoundByIsbn(String),

    #[error("No book with this title: {0} found")]
    NotFoundByTitle(String),

    #[error("No book with this author: {0} found")]
    NotFoundByAuthor(String),

    #[error("No book with this year: {0} found")]
    NotFoundByYear(i32),

    #[error("No book with this publisher: {0} found")]
    NotFoundByPublisher(String),

    #[error("No book found")]
    NoFamousBooks,

    #[error("Book with ISBN: {0} already exists")]
    AlreadyExists(String),

    #[error("Catalog store unavailable: {0}")]
    StoreUnavailable(String),
}

impl BookError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BookError::CatalogEmpty
                | BookError::NotFoundByIsbn(_)
                | BookError::NotFoundByTitle(_)
                | BookError::NotFoundByAuthor(_)
                | BookError::NotFoundByYear(_)
                | BookError::NotFoundByPublisher(_)
                | BookError::NoFamousBooks
        )
    }
}
