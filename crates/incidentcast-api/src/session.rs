//! Session identity extraction.
//!
//! The pending-batch store is keyed by a session UUID carried in the
//! `x-session-id` header. Clients that do not send one (the bundled
//! single-flow UI) share the nil-UUID default slot; a malformed value is a
//! client error rather than a silent new session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use incidentcast_core::AppError;
use uuid::Uuid;

use crate::constants::SESSION_HEADER;
use crate::error::HttpAppError;

/// Session key for the pending-batch store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(SESSION_HEADER) else {
            return Ok(SessionId(Uuid::nil()));
        };

        let value = value.to_str().map_err(|_| {
            HttpAppError(AppError::InvalidInput(format!(
                "{SESSION_HEADER} header must be ASCII"
            )))
        })?;

        let session = Uuid::parse_str(value).map_err(|_| {
            HttpAppError(AppError::InvalidInput(format!(
                "{SESSION_HEADER} header must be a UUID"
            )))
        })?;

        Ok(SessionId(session))
    }
}
