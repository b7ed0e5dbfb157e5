use crate::shared::Result;
use async_trait::async_trait;

/// AccessTokenProvider port for OAuth 2.0 bearer tokens
///
/// The Sheets client asks for a token before every request; providers are
/// expected to cache tokens until shortly before they expire.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns a bearer token valid for the spreadsheets scope
    ///
    /// # Errors
    /// Returns an error if a token cannot be obtained (bad key, token
    /// endpoint failure, network error)
    async fn access_token(&self) -> Result<String>;
}
