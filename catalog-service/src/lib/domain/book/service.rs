use std::sync::Arc;

use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::BookFilter;
use crate::book::models::BookLookup;
use crate::book::models::BookPatch;
use crate::book::models::CreateBookCommand;
use crate::book::ports::BookRepository;
use crate::book::ports::BookServicePort;

/// Domain service implementation for catalog operations.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }

    async fn list(&self, filter: BookFilter) -> Result<Vec<Book>, BookError> {
        let books = self.repository.find_many(&filter).await?;
        if books.is_empty() {
            return Err(filter.empty_error());
        }
        Ok(books)
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.list(BookFilter::All).await
    }

    async fn get_book_by_isbn(&self, isbn: &str) -> Result<Book, BookError> {
        self.repository
            .find_one(&BookLookup::Isbn(isbn.to_string()))
            .await?
            .ok_or_else(|| BookError::NotFoundByIsbn(isbn.to_string()))
    }

    async fn get_book_by_title(&self, title: &str) -> Result<Book, BookError> {
        self.repository
            .find_one(&BookLookup::Title(title.to_string()))
            .await?
            .ok_or_else(|| BookError::NotFoundByTitle(title.to_string()))
    }

    async fn list_books_by_author(&self, author: &str) -> Result<Vec<Book>, BookError> {
        self.list(BookFilter::Author(author.to_string())).await
    }

    async fn list_books_by_year(&self, year: i32) -> Result<Vec<Book>, BookError> {
        self.list(BookFilter::Year(year)).await
    }

    async fn list_books_by_publisher(&self, publisher: &str) -> Result<Vec<Book>, BookError> {
        self.list(BookFilter::Publisher(publisher.to_string())).await
    }

    async fn list_famous_books(&self) -> Result<Vec<Book>, BookError> {
        self.list(BookFilter::Famous).await
    }

    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        command.validate()?;
        let book = self.repository.create(Book::new(command)).await?;
        tracing::info!(book_id = %book.id, isbn = %book.isbn, "Book created");
        Ok(book)
    }

    async fn update_book(&self, isbn: &str, patch: BookPatch) -> Result<Book, BookError> {
        patch.validate()?;
        if patch.is_empty() {
            return self.get_book_by_isbn(isbn).await;
        }

        let book = self.repository.update(isbn, patch).await?;
        tracing::info!(book_id = %book.id, isbn = %book.isbn, "Book updated");
        Ok(book)
    }

    async fn delete_book(&self, isbn: &str) -> Result<(), BookError> {
        self.repository.delete(isbn).await?;
        tracing::info!(isbn = %isbn, "Book deleted");
        Ok(())
    }
}
