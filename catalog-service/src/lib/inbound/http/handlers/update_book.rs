use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::book::models::BookPatch;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::BookData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a book (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateBookRequest {
    #[serde(rename = "ISBN", alias = "isbn")]
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

impl From<UpdateBookRequest> for BookPatch {
    fn from(req: UpdateBookRequest) -> Self {
        BookPatch {
            isbn: req.isbn,
            title: req.title,
            author: req.author,
            currency: req.currency,
            description: req.description,
            language: req.language,
            page_count: req.page_count,
            price: req.price,
            published_date: req.published_date,
            publisher: req.publisher,
            rating: req.rating,
            voters: req.voters,
        }
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(isbn): Path<String>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let patch = BookPatch::from(req);
    tracing::debug!(actor = %account.email, isbn = %isbn, "Updating book");

    state
        .book_service
        .update_book(&isbn, patch)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
