// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor extraction for the server boundary.
//!
//! The caller's identity travels in two headers:
//!
//! - `x-actor-id`: an opaque, non-empty identifier
//! - `x-actor-role`: `admin` or `guest` (case-insensitive)
//!
//! Both are required on every permission-gated route.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use geodir_api::{ApiError, AuthError, AuthenticatedActor, Role, authenticate_stub};
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse, HttpError};

/// Header carrying the actor identifier.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the actor role.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Extractor for the authenticated caller.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     RequestActor(actor): RequestActor,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedActor
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if either header is missing or not valid UTF-8,
/// the role is unknown, or the actor id is blank.
pub struct RequestActor(pub AuthenticatedActor);

fn header_value<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, ActorError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| {
            debug!(header = name, "Missing actor header");
            ActorError::MissingHeader(name)
        })?
        .to_str()
        .map_err(|_| {
            warn!(header = name, "Invalid actor header encoding");
            ActorError::InvalidHeader(name)
        })
}

impl FromRequestParts<AppState> for RequestActor {
    type Rejection = ActorError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor_id: &str = header_value(parts, ACTOR_ID_HEADER)?;
        let role: Role = header_value(parts, ACTOR_ROLE_HEADER)?
            .parse()
            .map_err(|e: AuthError| {
                warn!(error = %e, "Actor role rejected");
                ActorError::Rejected(ApiError::from(e))
            })?;

        let actor: AuthenticatedActor =
            authenticate_stub(actor_id.to_string(), role).map_err(|e| {
                warn!(error = %e, "Actor authentication failed");
                ActorError::Rejected(ApiError::from(e))
            })?;

        debug!(actor_id = %actor.id, role = ?actor.role, "Actor extracted");

        Ok(Self(actor))
    }
}

/// Actor extraction errors.
///
/// Header problems map to HTTP 401 directly; rejected credentials go
/// through the same `HttpError` mapping as every workflow error.
#[derive(Debug)]
pub enum ActorError {
    /// A required header is absent.
    MissingHeader(&'static str),
    /// A header is not valid UTF-8.
    InvalidHeader(&'static str),
    /// The header values did not authenticate.
    Rejected(ApiError),
}

impl IntoResponse for ActorError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingHeader(name) => format!("Missing {name} header"),
            Self::InvalidHeader(name) => format!("Invalid {name} header"),
            Self::Rejected(err) => return HttpError::from(err).into_response(),
        };

        (
            StatusCode::UNAUTHORIZED,
            axum::Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
