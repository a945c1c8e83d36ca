use crate::infrastructure::repositories::ProviderError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use moka::future::Cache;
use moka::Expiry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
// Google access tokens live for an hour; refresh well before that
const TOKEN_CACHE_TTL: Duration = Duration::from_secs(50 * 60);
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

/// The fields of a service-account key file this service needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, scope: &str, now: i64) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: scope.to_string(),
            aud: key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    ttl: Duration,
}

/// Expires each cached token after its own lifetime
struct TokenExpiry;

impl Expiry<String, CachedToken> for TokenExpiry {
    fn expire_after_create(
        &self,
        _scope: &String,
        token: &CachedToken,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(token.ttl)
    }
}

/// How long to reuse a token that the endpoint says lives `expires_in` seconds
fn cache_ttl(expires_in: Option<i64>) -> Duration {
    match expires_in {
        Some(secs) => {
            let lifetime = Duration::from_secs(secs.max(0) as u64);
            lifetime.saturating_sub(TOKEN_EXPIRY_MARGIN).min(TOKEN_CACHE_TTL)
        }
        None => TOKEN_CACHE_TTL,
    }
}

/// Issues OAuth access tokens for a Google service account.
///
/// The key file is read lazily so a missing credential only fails the first
/// request that needs it. Tokens are cached per scope.
pub struct GoogleTokenProvider {
    credentials_path: Option<PathBuf>,
    credentials_source: &'static str,
    http_client: reqwest::Client,
    cache: Cache<String, CachedToken>,
}

impl GoogleTokenProvider {
    /// `credentials_source` names the setting the path came from, for error messages
    pub fn new(
        credentials_path: Option<PathBuf>,
        credentials_source: &'static str,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            credentials_path,
            credentials_source,
            http_client,
            cache: Cache::builder()
                .max_capacity(8)
                .expire_after(TokenExpiry)
                .build(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials_path.is_some()
    }

    /// Get an access token for `scope`, minting a new one when the cache is empty
    pub async fn access_token(&self, scope: &str) -> Result<String, ProviderError> {
        if let Some(token) = self.cache.get(scope).await {
            return Ok(token.access_token);
        }

        let key = self.load_key().await?;
        let assertion = sign_assertion(&key, scope, chrono::Utc::now().timestamp())?;
        let token = self.exchange_assertion(&key.token_uri, &assertion).await?;

        let ttl = cache_ttl(token.expires_in);
        if !ttl.is_zero() {
            let cached = CachedToken {
                access_token: token.access_token.clone(),
                ttl,
            };
            self.cache.insert(scope.to_string(), cached).await;
        }
        tracing::debug!(
            scope = scope,
            client_email = %key.client_email,
            expires_in = ?token.expires_in,
            cache_ttl_secs = ttl.as_secs(),
            "Google access token issued"
        );

        Ok(token.access_token)
    }

    pub async fn load_key(&self) -> Result<ServiceAccountKey, ProviderError> {
        let path = self.credentials_path.as_ref().ok_or_else(|| {
            ProviderError::Configuration(format!(
                "{} environment variable is not set.",
                self.credentials_source
            ))
        })?;

        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            ProviderError::Configuration(format!(
                "Failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            ProviderError::Configuration(format!(
                "Invalid service account credentials in {}: {}",
                path.display(),
                e
            ))
        })
    }

    async fn exchange_assertion(
        &self,
        token_uri: &str,
        assertion: &str,
    ) -> Result<TokenResponse, ProviderError> {
        let params = [("grant_type", JWT_BEARER_GRANT_TYPE), ("assertion", assertion)];

        let response = self
            .http_client
            .post(token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Upstream(format!("Google token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Upstream(format!(
                "Google token exchange failed: {}",
                error_text
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ProviderError::Upstream(format!("Failed to parse Google token: {}", e)))
    }
}

/// Sign the RS256 JWT-bearer assertion for the token endpoint
pub fn sign_assertion(
    key: &ServiceAccountKey,
    scope: &str,
    now: i64,
) -> Result<String, ProviderError> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
        ProviderError::Configuration(format!("Invalid service account private key: {}", e))
    })?;

    jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &AssertionClaims::new(key, scope, now),
        &encoding_key,
    )
    .map_err(|e| ProviderError::Configuration(format!("Failed to sign token assertion: {}", e)))
}
