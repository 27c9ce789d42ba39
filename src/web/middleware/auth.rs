//! Shared-secret authentication for mutating endpoints.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Decides whether a request may mutate storage.
///
/// `header_value` is the raw value of the configured auth header, or `None`
/// when the header is absent or not valid UTF-8.
pub trait CredentialCheck: Send + Sync {
    /// Return `true` when the credential is accepted.
    fn validate(&self, header_value: Option<&str>) -> bool;
}

/// Exact-match comparison against a single static secret.
#[derive(Debug, Clone)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    /// Create a checker for the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialCheck for SharedSecret {
    fn validate(&self, header_value: Option<&str>) -> bool {
        header_value.is_some_and(|v| v == self.secret)
    }
}

/// Extractor that rejects the request unless the auth header is accepted.
///
/// It only looks at request parts, so it runs before any body extractor and
/// a rejected upload never touches the filesystem.
#[derive(Debug, Clone, Copy)]
pub struct PassHeader;

impl FromRequestParts<Arc<AppState>> for PassHeader {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let value = parts
                .headers
                .get(&state.auth_header)
                .and_then(|v| v.to_str().ok());

            if state.credentials.validate(value) {
                Ok(PassHeader)
            } else {
                tracing::warn!(
                    method = %parts.method,
                    uri = %parts.uri,
                    header_present = value.is_some(),
                    "Rejected request with bad shared secret"
                );
                Err(ApiError::unauthorized())
            }
        })
    }
}
