use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::inbound::http::router::AppState;

pub async fn get_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    state
        .book_service
        .get_book_by_isbn(&isbn)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}

pub async fn get_book_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    state
        .book_service
        .get_book_by_title(&title)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
