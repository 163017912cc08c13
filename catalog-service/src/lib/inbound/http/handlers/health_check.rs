use axum::http::StatusCode;

use super::ApiSuccess;
use super::MessageData;

pub const WELCOME_MESSAGE: &str = "Welcome to the book catalog RESTful API built with axum and PostgreSQL!";

pub async fn health_check() -> ApiSuccess<MessageData> {
    ApiSuccess::new(StatusCode::OK, MessageData::new(WELCOME_MESSAGE))
}
