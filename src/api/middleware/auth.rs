//! API key authorization extractor
//!
//! Handlers declare their minimum permission level through the type
//! parameter; the extractor runs the full authorization pipeline and then
//! enforces the level before the handler body runs.

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::{Identity, PermissionLevel};

/// Header carrying the caller's API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Minimum permission level a handler requires
pub trait AccessLevel: Send + Sync {
    const REQUIRED: PermissionLevel;
}

/// Any authenticated caller
#[derive(Debug, Clone, Copy)]
pub struct ReadAccess;

/// Callers that may mutate data
#[derive(Debug, Clone, Copy)]
pub struct WriteAccess;

/// Administrative callers only
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl AccessLevel for ReadAccess {
    const REQUIRED: PermissionLevel = PermissionLevel::Read;
}

impl AccessLevel for WriteAccess {
    const REQUIRED: PermissionLevel = PermissionLevel::Write;
}

impl AccessLevel for AdminAccess {
    const REQUIRED: PermissionLevel = PermissionLevel::Admin;
}

/// Extractor that authorizes the request and attaches the caller's identity
#[derive(Debug, Clone)]
pub struct Authorized<A: AccessLevel> {
    identity: Identity,
    _level: PhantomData<A>,
}

impl<A: AccessLevel> Authorized<A> {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

impl<A: AccessLevel> FromRequestParts<AppState> for Authorized<A> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let api_key = extract_api_key(&parts.headers);
        let identity = state.authorizer.authorize(api_key.as_deref()).await?;

        if !identity.permission_level.allows(A::REQUIRED) {
            return Err(ApiError::forbidden("Insufficient permissions"));
        }

        Ok(Self {
            identity,
            _level: PhantomData,
        })
    }
}

/// Read the presented key from the request headers. Empty and undecodable
/// values count as absent.
pub fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, "dh_live_abc123".parse().unwrap());

        assert_eq!(
            extract_api_key(&headers),
            Some("dh_live_abc123".to_string())
        );
    }

    #[test]
    fn test_extract_trims_whitespace() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, "  dh_live_abc123  ".parse().unwrap());

        assert_eq!(
            extract_api_key(&headers),
            Some("dh_live_abc123".to_string())
        );
    }

    #[test]
    fn test_extract_missing_header() {
        assert_eq!(extract_api_key(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_empty_value_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, "".parse().unwrap());

        assert_eq!(extract_api_key(&headers), None);
    }

    #[test]
    fn test_access_level_requirements() {
        assert_eq!(ReadAccess::REQUIRED, PermissionLevel::Read);
        assert_eq!(WriteAccess::REQUIRED, PermissionLevel::Write);
        assert_eq!(AdminAccess::REQUIRED, PermissionLevel::Admin);
    }
}
