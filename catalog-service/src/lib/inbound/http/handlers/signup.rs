use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordPolicyError;
use crate::domain::account::models::AuthOutcome;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::SignupCommand;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<AccessTokenData>, ApiError> {
    match state.auth_flow.signup(body.try_into_command()?).await? {
        AuthOutcome::Committed(token) => Ok(ApiSuccess::new(
            StatusCode::CREATED,
            AccessTokenData {
                access_token: token.into_inner(),
            },
        )),
        AuthOutcome::Rejected(rejection) => Err(rejection.into()),
    }
}

/// HTTP request body for signup (raw JSON)
#[derive(Clone, Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ParseSignupRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(SignupCommand::new(email, password))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Token returned by signup and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenData {
    pub access_token: String,
}
