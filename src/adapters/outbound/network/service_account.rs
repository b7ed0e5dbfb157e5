use crate::ports::outbound::AccessTokenProvider;
use crate::shared::error::SheetsError;
use crate::shared::security::read_small_file;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tokio::sync::Mutex;

/// OAuth scope granting read/write access to spreadsheets
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before they expire
const EXPIRY_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a Google service account JSON key that are used here
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ServiceAccountKey {
    /// Loads a key file, refusing symlinks and oversized files
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SheetsError::CredentialsNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = read_small_file(path, "credentials file")?;
        Self::from_json(&content).map_err(|e| {
            SheetsError::CredentialsParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_str(content)?;

        if let Some(key_type) = key.key_type.as_deref() {
            if key_type != "service_account" {
                anyhow::bail!(
                    "Expected a service_account key, found type '{}'",
                    key_type
                );
            }
        }
        if key.client_email.trim().is_empty() {
            anyhow::bail!("client_email is empty");
        }

        Ok(key)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + ChronoDuration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// ServiceAccountTokenProvider adapter implementing the two-legged OAuth flow
///
/// Signs an RS256 JWT assertion with the service account's private key and
/// exchanges it at the key's `token_uri`. The token is cached until shortly
/// before it expires; the lock is held across a refresh so concurrent callers
/// share one exchange.
pub struct ServiceAccountTokenProvider {
    client: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetsError::TokenExchangeFailed {
                details: format!("Invalid private key: {}", e),
            })?;
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("whatsaterminal/{}", version))
            .build()?;

        Ok(Self {
            client,
            key,
            encoding_key,
            scope: SPREADSHEETS_SCOPE.to_string(),
            cached: Mutex::new(None),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::new(ServiceAccountKey::from_file(path)?)
    }

    pub fn key(&self) -> &ServiceAccountKey {
        &self.key
    }

    /// Builds the signed JWT sent to the token endpoint
    pub fn build_assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: self.scope.clone(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        Ok(jsonwebtoken::encode(&header, &claims, &self.encoding_key)?)
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken> {
        let assertion = self.build_assertion(now)?;
        tracing::debug!(token_uri = %self.key.token_uri, "requesting access token");

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await
            .map_err(|e| SheetsError::TokenExchangeFailed {
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::TokenExchangeFailed {
                details: format!("token endpoint returned {}: {}", status, body.trim()),
            }
            .into());
        }

        let token: TokenResponse =
            response
                .json()
                .await
                .map_err(|e| SheetsError::TokenExchangeFailed {
                    details: format!("unreadable token response: {}", e),
                })?;

        Ok(CachedToken {
            token: token.access_token,
            expires_at: now + ChronoDuration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.token.clone());
        }

        let fresh = self.exchange(now).await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}
