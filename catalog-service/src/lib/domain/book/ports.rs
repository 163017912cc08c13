use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::BookFilter;
use crate::book::models::BookLookup;
use crate::book::models::BookPatch;
use crate::book::models::CreateBookCommand;

/// Port for catalog operations.
///
/// Every listing reports an empty result as a not-found error.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `CatalogEmpty` - No books stored
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// # Errors
    /// * `NotFoundByIsbn` - No book with this ISBN
    async fn get_book_by_isbn(&self, isbn: &str) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFoundByTitle` - No book with this title
    async fn get_book_by_title(&self, title: &str) -> Result<Book, BookError>;

    async fn list_books_by_author(&self, author: &str) -> Result<Vec<Book>, BookError>;

    async fn list_books_by_year(&self, year: i32) -> Result<Vec<Book>, BookError>;

    async fn list_books_by_publisher(&self, publisher: &str) -> Result<Vec<Book>, BookError>;

    /// Books rated 5 or more.
    async fn list_famous_books(&self) -> Result<Vec<Book>, BookError>;

    /// # Errors
    /// * `AlreadyExists` - ISBN already in the catalog
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFoundByIsbn` - No book with this ISBN
    /// * `AlreadyExists` - Patch moves the book onto a taken ISBN
    async fn update_book(&self, isbn: &str, patch: BookPatch) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFoundByIsbn` - No book with this ISBN
    async fn delete_book(&self, isbn: &str) -> Result<(), BookError>;
}

/// Persistence operations for books.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Retrieve the first book matching `lookup`.
    async fn find_one(&self, lookup: &BookLookup) -> Result<Option<Book>, BookError>;

    /// Retrieve every book matching `filter`, oldest first.
    async fn find_many(&self, filter: &BookFilter) -> Result<Vec<Book>, BookError>;

    /// # Errors
    /// * `AlreadyExists` - ISBN is already stored
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    /// Apply `patch` to the book stored under `isbn`.
    ///
    /// # Errors
    /// * `NotFoundByIsbn` - No book with this ISBN
    /// * `AlreadyExists` - New ISBN is already stored
    async fn update(&self, isbn: &str, patch: BookPatch) -> Result<Book, BookError>;

    /// # Errors
    /// * `NotFoundByIsbn` - No book with this ISBN
    async fn delete(&self, isbn: &str) -> Result<(), BookError>;
}
