use crate::ports::outbound::AccessTokenProvider;
use crate::shared::error::SheetsError;
use crate::shared::Result;
use async_trait::async_trait;

/// StaticTokenProvider adapter for a pre-issued access token
///
/// Used with `--access-token`, e.g. a token printed by
/// `gcloud auth print-access-token`. The token is never refreshed.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(SheetsError::validation("Access token cannot be empty").into());
        }
        Ok(Self { token })
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
