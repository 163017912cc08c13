use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::book::errors::BookError;
use crate::domain::book::models::CreateBookCommand;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Json(body): Json<CreateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let command = body.try_into_command()?;
    tracing::debug!(actor = %account.email, isbn = %command.isbn, "Creating book");

    state
        .book_service
        .create_book(command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

/// HTTP request body for creating a book (raw JSON)
///
/// Only `ISBN` and `title` are required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateBookRequest {
    #[serde(rename = "ISBN", alias = "isbn")]
    isbn: String,
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    page_count: i32,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    published_date: String,
    #[serde(default)]
    publisher: String,
    rating: Option<f64>,
    voters: Option<i64>,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, BookError> {
        let mut command = CreateBookCommand::new(self.isbn, self.title)?;
        command.author = self.author;
        command.currency = self.currency;
        command.description = self.description;
        command.language = self.language;
        command.page_count = self.page_count;
        command.price = self.price;
        command.published_date = self.published_date;
        command.publisher = self.publisher;
        command.rating = self.rating;
        command.voters = self.voters;
        Ok(command)
    }
}
