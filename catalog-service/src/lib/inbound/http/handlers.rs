use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Rejection;
use crate::book::errors::BookError;
use crate::book::models::Book;

pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod health_check;
pub mod list_books;
pub mod login;
pub mod signup;
pub mod update_book;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                // Details stay in the log, never in the body
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Conflict => ApiError::Conflict("user already exists!".to_string()),
            Rejection::Unauthorized => ApiError::Unauthorized("Wrong login details!".to_string()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidEmail(_) | AccountError::InvalidPassword(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AccountError::AlreadyExists(_) => Rejection::Conflict.into(),
            AccountError::IntegrityViolation(_)
            | AccountError::StoreUnavailable(_)
            | AccountError::Password(_)
            | AccountError::Token(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::InvalidBook(_) => ApiError::UnprocessableEntity(err.to_string()),
            BookError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            BookError::StoreUnavailable(_) => ApiError::InternalServerError(err.to_string()),
            _ if err.is_not_found() => ApiError::NotFound(err.to_string()),
            _ => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    error: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, error: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Book as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookData {
    pub id: String,
    #[serde(rename = "ISBN")]
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

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            currency: book.currency.clone(),
            description: book.description.clone(),
            language: book.language.clone(),
            page_count: book.page_count,
            price: book.price,
            published_date: book.published_date.clone(),
            publisher: book.publisher.clone(),
            rating: book.rating,
            voters: book.voters,
        }
    }
}
