use auth::TokenVerification;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::handlers::ApiErrorBody;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    pub email: String,
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiErrorBody::new(
            StatusCode::UNAUTHORIZED,
            message.to_string(),
        )),
    )
        .into_response()
}

/// Middleware that validates bearer tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    // Expired and malformed tokens look the same to the client
    let payload = match state.authenticator.validate_token(token) {
        TokenVerification::Valid(payload) => payload,
        TokenVerification::Expired => {
            tracing::warn!("Rejected expired token");
            return Err(unauthorized("Invalid or expired token"));
        }
        TokenVerification::Malformed => {
            tracing::warn!("Rejected malformed token");
            return Err(unauthorized("Invalid or expired token"));
        }
    };

    req.extensions_mut().insert(AuthenticatedAccount {
        email: payload.subject,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
        })
}
