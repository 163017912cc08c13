use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::book::errors::BookError;

/// Minimum rating for a book to be listed as famous.
pub const FAMOUS_RATING: f64 = 5.0;

/// Column widths of the `books` table, in characters.
pub const MAX_ISBN_LEN: usize = 32;
pub const MAX_CURRENCY_LEN: usize = 16;
pub const MAX_LANGUAGE_LEN: usize = 64;
pub const MAX_PUBLISHED_DATE_LEN: usize = 64;

/// Catalog entry.
///
/// `isbn` is the business key used for lookup, update and delete.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub currency: String,
    pub description: String,
    pub language: String,
    pub page_count: i32,
    pub price: f64,
    pub published_date: String,
    pub publisher: String,
    pub rating: Option<f64>,
    pub voters: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Build a new catalog entry from a create command.
    pub fn new(command: CreateBookCommand) -> Self {
        Self {
            id: BookId::new(),
            isbn: command.isbn,
            title: command.title,
            author: command.author,
            currency: command.currency,
            description: command.description,
            language: command.language,
            page_count: command.page_count,
            price: command.price,
            published_date: command.published_date,
            publisher: command.publisher,
            rating: command.rating,
            voters: command.voters,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the fields present in `patch`.
    pub fn apply(&mut self, patch: BookPatch) {
        let BookPatch {
            isbn,
            title,
            author,
            currency,
            description,
            language,
            page_count,
            price,
            published_date,
            publisher,
            rating,
            voters,
        } = patch;

        if let Some(isbn) = isbn {
            self.isbn = isbn;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(author) = author {
            self.author = author;
        }
        if let Some(currency) = currency {
            self.currency = currency;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(language) = language {
            self.language = language;
        }
        if let Some(page_count) = page_count {
            self.page_count = page_count;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(published_date) = published_date {
            self.published_date = published_date;
        }
        if let Some(publisher) = publisher {
            self.publisher = publisher;
        }
        if rating.is_some() {
            self.rating = rating;
        }
        if voters.is_some() {
            self.voters = voters;
        }
    }
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to add a book to the catalog.
///
/// Only `isbn` and `title` are mandatory; missing descriptive fields default
/// to empty values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateBookCommand {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub currency: String,
    pub description: String,
    pub language: String,
    pub page_count: i32,
    pub price: f64,
    pub published_date: String,
    pub publisher: String,
    pub rating: Option<f64>,
    pub voters: Option<i64>,
}

impl CreateBookCommand {
    /// Start a command with the mandatory fields.
    ///
    /// # Errors
    /// * `InvalidBook` - ISBN or title is blank, or the ISBN is too long
    pub fn new(isbn: String, title: String) -> Result<Self, BookError> {
        let command = Self {
            isbn,
            title,
            ..Self::default()
        };
        command.validate()?;
        Ok(command)
    }

    /// Check every field against the catalog's rules.
    ///
    /// Fields are public, so the service re-checks before persisting.
    pub fn validate(&self) -> Result<(), BookError> {
        require_text("ISBN", &self.isbn)?;
        require_text("title", &self.title)?;
        limit_length("ISBN", &self.isbn, MAX_ISBN_LEN)?;
        limit_length("currency", &self.currency, MAX_CURRENCY_LEN)?;
        limit_length("language", &self.language, MAX_LANGUAGE_LEN)?;
        limit_length("published_date", &self.published_date, MAX_PUBLISHED_DATE_LEN)
    }
}

/// Partial update. Only provided fields will be updated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookPatch {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub page_count: Option<i32>,
    pub price: Option<f64>,
    pub published_date: Option<String>,
    pub publisher: Option<String>,
    pub rating: Option<f64>,
    pub voters: Option<i64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Same rules as [`CreateBookCommand::validate`], for the fields present.
    pub fn validate(&self) -> Result<(), BookError> {
        if let Some(isbn) = &self.isbn {
            require_text("ISBN", isbn)?;
            limit_length("ISBN", isbn, MAX_ISBN_LEN)?;
        }
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(currency) = &self.currency {
            limit_length("currency", currency, MAX_CURRENCY_LEN)?;
        }
        if let Some(language) = &self.language {
            limit_length("language", language, MAX_LANGUAGE_LEN)?;
        }
        if let Some(published_date) = &self.published_date {
            limit_length("published_date", published_date, MAX_PUBLISHED_DATE_LEN)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), BookError> {
    if value.trim().is_empty() {
        return Err(BookError::InvalidBook(format!("{field} must not be empty")));
    }
    Ok(())
}

fn limit_length(field: &str, value: &str, max: usize) -> Result<(), BookError> {
    if value.chars().count() > max {
        return Err(BookError::InvalidBook(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Single-book lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookLookup {
    Isbn(String),
    Title(String),
}

impl BookLookup {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookLookup::Isbn(isbn) => book.isbn == *isbn,
            BookLookup::Title(title) => book.title == *title,
        }
    }
}

/// Multi-book listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    Author(String),
    Publisher(String),
    /// `published_date` mentions the year (case-insensitive substring).
    Year(i32),
    /// Rating at or above [`FAMOUS_RATING`].
    Famous,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Author(author) => book.author == *author,
            BookFilter::Publisher(publisher) => book.publisher == *publisher,
            BookFilter::Year(year) => book
                .published_date
                .to_lowercase()
                .contains(&year.to_string()),
            BookFilter::Famous => book.rating.is_some_and(|rating| rating >= FAMOUS_RATING),
        }
    }

    /// Error reported when this filter matches nothing.
    pub fn empty_error(&self) -> BookError {
        match self {
            BookFilter::All => BookError::CatalogEmpty,
            BookFilter::Author(author) => BookError::NotFoundByAuthor(author.clone()),
            BookFilter::Publisher(publisher) => BookError::NotFoundByPublisher(publisher.clone()),
            BookFilter::Year(year) => BookError::NotFoundByYear(*year),
            BookFilter::Famous => BookError::NoFamousBooks,
        }
    }
}
