use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::signup::AccessTokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AuthOutcome;
use crate::domain::account::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AccessTokenData>, ApiError> {
    let command = LoginCommand::new(body.email, body.password);

    match state.auth_flow.login(command).await? {
        AuthOutcome::Committed(token) => Ok(ApiSuccess::new(
            StatusCode::OK,
            AccessTokenData {
                access_token: token.into_inner(),
            },
        )),
        AuthOutcome::Rejected(rejection) => Err(rejection.into()),
    }
}

/// Credentials are passed through as-is; the service decides.
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}
