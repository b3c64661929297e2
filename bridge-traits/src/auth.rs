//! Access token source
//!
//! Account management and OAuth refresh live in the host. The core only asks
//! for the current access token of the account that owns a drive.

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;

/// Current credentials for one account.
///
/// The `Debug` implementation redacts the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessTokens {
    /// Bearer token for API requests
    pub access_token: String,
}

impl AccessTokens {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

impl fmt::Debug for AccessTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokens")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Supplies access tokens for the account owning a drive.
///
/// Returning `Ok(None)` means no token is available; callers decide whether
/// that is fatal.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_tokens(&self, drive_id: &str) -> Result<Option<AccessTokens>>;
}
