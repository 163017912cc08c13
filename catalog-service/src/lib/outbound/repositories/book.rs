use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::bounded;
use super::QueryFailure;
use crate::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookFilter;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookLookup;
use crate::domain::book::models::BookPatch;
use crate::domain::book::models::FAMOUS_RATING;
use crate::domain::book::ports::BookRepository;

const BOOK_COLUMNS: &str = "id, isbn, title, author, currency, description, language, \
     page_count, price, published_date, publisher, rating, voters, created_at";

pub struct PostgresBookRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    isbn: String,
    title: String,
    author: String,
    currency: String,
    description: String,
    language: String,
    page_count: i32,
    price: f64,
    published_date: String,
    publisher: String,
    rating: Option<f64>,
    voters: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: BookId(row.id),
            isbn: row.isbn,
            title: row.title,
            author: row.author,
            currency: row.currency,
            description: row.description,
            language: row.language,
            page_count: row.page_count,
            price: row.price,
            published_date: row.published_date,
            publisher: row.publisher,
            rating: row.rating,
            voters: row.voters,
            created_at: row.created_at,
        }
    }
}

fn store_unavailable(e: QueryFailure) -> BookError {
    tracing::error!(error = %e, "Book store query failed");
    BookError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn find_one(&self, lookup: &BookLookup) -> Result<Option<Book>, BookError> {
        let (column, value) = match lookup {
            BookLookup::Isbn(isbn) => ("isbn", isbn),
            BookLookup::Title(title) => ("title", title),
        };
        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE {column} = $1 ORDER BY created_at LIMIT 1"
        );

        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, BookRow>(&sql)
                .bind(value.as_str())
                .fetch_optional(&self.pool),
        )
        .await
        .map_err(store_unavailable)?;

        Ok(row.map(Book::from))
    }

    async fn find_many(&self, filter: &BookFilter) -> Result<Vec<Book>, BookError> {
        let condition = match filter {
            BookFilter::All => "",
            BookFilter::Author(_) => "WHERE author = $1",
            BookFilter::Publisher(_) => "WHERE publisher = $1",
            BookFilter::Year(_) => "WHERE published_date ILIKE '%' || $1 || '%'",
            BookFilter::Famous => "WHERE rating >= $1",
        };
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books {condition} ORDER BY created_at");

        let query = sqlx::query_as::<_, BookRow>(&sql);
        let query = match filter {
            BookFilter::All => query,
            BookFilter::Author(author) => query.bind(author.as_str()),
            BookFilter::Publisher(publisher) => query.bind(publisher.as_str()),
            BookFilter::Year(year) => query.bind(year.to_string()),
            BookFilter::Famous => query.bind(FAMOUS_RATING),
        };

        let rows = bounded(self.query_timeout, query.fetch_all(&self.pool))
            .await
            .map_err(store_unavailable)?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(&self, book: Book) -> Result<Book, BookError> {
        let sql = format!(
            "INSERT INTO books ({BOOK_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)"
        );

        bounded(
            self.query_timeout,
            sqlx::query(&sql)
                .bind(book.id.0)
                .bind(&book.isbn)
                .bind(&book.title)
                .bind(&book.author)
                .bind(&book.currency)
                .bind(&book.description)
                .bind(&book.language)
                .bind(book.page_count)
                .bind(book.price)
                .bind(&book.published_date)
                .bind(&book.publisher)
                .bind(book.rating)
                .bind(book.voters)
                .bind(book.created_at)
                .execute(&self.pool),
        )
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                return BookError::AlreadyExists(book.isbn.clone());
            }
            store_unavailable(e)
        })?;

        Ok(book)
    }

    async fn update(&self, isbn: &str, patch: BookPatch) -> Result<Book, BookError> {
        let target_isbn = patch.isbn.clone().unwrap_or_else(|| isbn.to_string());
        let sql = format!(
            r#"
            UPDATE books SET
                isbn = COALESCE($2, isbn),
                title = COALESCE($3, title),
                author = COALESCE($4, author),
                currency = COALESCE($5, currency),
                description = COALESCE($6, description),
                language = COALESCE($7, language),
                page_count = COALESCE($8, page_count),
                price = COALESCE($9, price),
                published_date = COALESCE($10, published_date),
                publisher = COALESCE($11, publisher),
                rating = COALESCE($12, rating),
                voters = COALESCE($13, voters)
            WHERE isbn = $1
            RETURNING {BOOK_COLUMNS}
            "#
        );

        let row = bounded(
            self.query_timeout,
            sqlx::query_as::<_, BookRow>(&sql)
                .bind(isbn)
                .bind(patch.isbn)
                .bind(patch.title)
                .bind(patch.author)
                .bind(patch.currency)
                .bind(patch.description)
                .bind(patch.language)
                .bind(patch.page_count)
                .bind(patch.price)
                .bind(patch.published_date)
                .bind(patch.publisher)
                .bind(patch.rating)
                .bind(patch.voters)
                .fetch_optional(&self.pool),
        )
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                return BookError::AlreadyExists(target_isbn.clone());
            }
            store_unavailable(e)
        })?;

        row.map(Book::from)
            .ok_or_else(|| BookError::NotFoundByIsbn(isbn.to_string()))
    }

    async fn delete(&self, isbn: &str) -> Result<(), BookError> {
        let result = bounded(
            self.query_timeout,
            sqlx::query("DELETE FROM books WHERE isbn = $1")
                .bind(isbn)
                .execute(&self.pool),
        )
        .await
        .map_err(store_unavailable)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFoundByIsbn(isbn.to_string()));
        }

        Ok(())
    }
}
