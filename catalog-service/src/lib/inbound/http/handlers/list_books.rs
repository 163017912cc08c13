use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::BookData;
use crate::domain::book::models::Book;
use crate::inbound::http::router::AppState;

fn listing(books: Vec<Book>) -> ApiSuccess<Vec<BookData>> {
    ApiSuccess::new(StatusCode::OK, books.iter().map(BookData::from).collect())
}

pub async fn list_books(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    state
        .book_service
        .list_books()
        .await
        .map_err(ApiError::from)
        .map(listing)
}

pub async fn list_books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    state
        .book_service
        .list_books_by_author(&author)
        .await
        .map_err(ApiError::from)
        .map(listing)
}

pub async fn list_books_by_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    state
        .book_service
        .list_books_by_year(year)
        .await
        .map_err(ApiError::from)
        .map(listing)
}

pub async fn list_books_by_publisher(
    State(state): State<AppState>,
    Path(publisher): Path<String>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    state
        .book_service
        .list_books_by_publisher(&publisher)
        .await
        .map_err(ApiError::from)
        .map(listing)
}

pub async fn list_famous_books(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    state
        .book_service
        .list_famous_books()
        .await
        .map_err(ApiError::from)
        .map(listing)
}
