// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity extraction from request headers.
//!
//! Admin identity comes from `x-actor-id` and `x-actor-role`; the role label
//! is passed through untouched and normalised by the API layer. Students are
//! identified by `x-student-id`.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use campus_complaints_api::{ApiError, StaticSession};
use campus_complaints_audit::Cause;
use tracing::{debug, warn};

use crate::HttpError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
pub const STUDENT_ID_HEADER: &str = "x-student-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn header_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, HttpError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map(str::to_string).map_err(|_| {
                warn!(header = name, "Header is not valid UTF-8");
                HttpError::from(ApiError::Unauthenticated {
                    reason: format!("header '{name}' is not valid UTF-8"),
                })
            })
        })
        .transpose()
}

/// The admin session carried by a request's headers.
///
/// Missing headers are not rejected here; the API layer reports them as
/// `Unauthenticated` so every endpoint fails the same way.
pub struct AdminSession(pub StaticSession);

impl<S: Send + Sync> FromRequestParts<S> for AdminSession {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor_id: Option<String> = header_value(&parts.headers, ACTOR_ID_HEADER)?;
        let role: Option<String> = header_value(&parts.headers, ACTOR_ROLE_HEADER)?;
        debug!(actor_id = ?actor_id, role = ?role, "Admin session extracted");
        Ok(Self(StaticSession::from_parts(actor_id, role)))
    }
}

/// The submitting student's account id.
pub struct StudentIdentity(pub String);

impl<S: Send + Sync> FromRequestParts<S> for StudentIdentity {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header_value(&parts.headers, STUDENT_ID_HEADER)?
            .filter(|id| !id.trim().is_empty())
            .map(Self)
            .ok_or_else(|| {
                debug!("Missing student identity header");
                HttpError::from(ApiError::Unauthenticated {
                    reason: format!("missing '{STUDENT_ID_HEADER}' header"),
                })
            })
    }
}

/// The audit cause for a request.
///
/// Uses the caller's `x-request-id` when present, otherwise the method and path.
pub struct RequestCause(pub Cause);

impl<S: Send + Sync> FromRequestParts<S> for RequestCause {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let route: String = format!("{} {}", parts.method, parts.uri.path());
        let id: String = header_value(&parts.headers, REQUEST_ID_HEADER)?
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| route.clone());
        Ok(Self(Cause::new(id, format!("HTTP {route}"))))
    }
}
