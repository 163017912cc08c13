use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn delete_book(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Path(isbn): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    tracing::debug!(actor = %account.email, isbn = %isbn, "Deleting book");

    state
        .book_service
        .delete_book(&isbn)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("book deleted successfully!")))
}
