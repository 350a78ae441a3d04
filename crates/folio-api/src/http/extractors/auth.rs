//! Caller identity extractor.
//!
//! - `Authorization: Bearer <token>` resolves to a registered user. An
//!   unknown token is rejected with 401; a missing header is anonymous.
//! - `X-Session-Key: <key>` identifies an anonymous visitor's sessions.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use folio_types::chat::Requester;
use folio_types::error::AccountError;

use crate::http::error::AppError;
use crate::state::AppState;

pub const SESSION_KEY_HEADER: &str = "x-session-key";

/// Who is making the request.
pub struct Identity(pub Requester);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_key = header_str(parts, SESSION_KEY_HEADER)?
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        let Some(token) = bearer_token(parts)? else {
            return Ok(Identity(Requester::anonymous(session_key)));
        };

        let user = state
            .account_service
            .authenticate(token)
            .await
            .map_err(|e| match e {
                AccountError::InvalidToken => AppError::Unauthorized(
                    "Invalid bearer token. Provide a valid token via 'Authorization: Bearer <token>'."
                        .to_string(),
                ),
                other => AppError::Account(other),
            })?;

        Ok(Identity(Requester {
            user_id: Some(user.id),
            session_key,
        }))
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, AppError> {
    parts
        .headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::Unauthorized(format!("Invalid {name} header encoding")))
        })
        .transpose()
}

/// Token from `Authorization: Bearer <token>`, if the header is present.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(auth) = header_str(parts, "authorization")? else {
        return Ok(None);
    };
    match auth.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(Some(token)),
        _ => Err(AppError::Unauthorized(
            "Authorization header must use the 'Bearer <token>' scheme".to_string(),
        )),
    }
}
