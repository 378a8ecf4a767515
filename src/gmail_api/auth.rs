use async_trait::async_trait;
use log::{debug, info};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use yup_oauth2::error::AuthErrorCode;
use yup_oauth2::{ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod};

pub const GMAIL_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";
const GOOGLE_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("sign-in services unavailable: {0}")]
    ServicesUnavailable(String),
    #[error("sign-in was cancelled")]
    Cancelled,
    #[error("{0}")]
    SignIn(String),
    #[error("no access token was issued")]
    MissingToken,
}

/// OAuth client configuration, set up once at startup and handed to the
/// provider.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: Option<ApplicationSecret>,
    pub scopes: Vec<String>,
}

impl AuthConfig {
    pub fn new(secret: Option<ApplicationSecret>) -> Self {
        Self {
            secret,
            scopes: vec![GMAIL_READONLY_SCOPE.to_string()],
        }
    }

    pub fn from_client_id(client_id: String, client_secret: Option<String>) -> Self {
        let secret = ApplicationSecret {
            client_id,
            client_secret: client_secret.unwrap_or_default(),
            auth_uri: GOOGLE_AUTH_URI.to_string(),
            token_uri: GOOGLE_TOKEN_URI.to_string(),
            redirect_uris: vec!["http://localhost".to_string()],
            ..ApplicationSecret::default()
        };
        Self::new(Some(secret))
    }

    pub async fn from_secret_file(path: &Path) -> std::io::Result<Self> {
        let secret = yup_oauth2::read_application_secret(path).await?;
        Ok(Self::new(Some(secret)))
    }

    pub fn unconfigured() -> Self {
        Self::new(None)
    }
}

/// Bearer credential for the mail API. Lives only as long as one fetch.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn bearer(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Outcome of the interactive sign-in step.
#[derive(Default)]
pub struct SignedInUser {
    pub access_token: Option<String>,
    pub expires_at: Option<OffsetDateTime>,
}

pub struct Tokens {
    pub access_token: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    async fn has_services(&self) -> Result<(), AuthError>;
    async fn sign_in(&self) -> Result<SignedInUser, AuthError>;
    async fn get_tokens(&self, user: &SignedInUser) -> Result<Tokens, AuthError>;
}

/// Google sign-in through the installed-app flow with a loopback redirect.
/// Tokens are kept in memory only, so every sign-in starts from scratch.
pub struct GoogleOAuthProvider {
    config: AuthConfig,
}

impl GoogleOAuthProvider {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

fn map_flow_error(e: yup_oauth2::Error) -> AuthError {
    match e {
        yup_oauth2::Error::AuthError(ref err) if matches!(err.error, AuthErrorCode::AccessDenied) => {
            AuthError::Cancelled
        }
        other => AuthError::SignIn(other.to_string()),
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthProvider {
    async fn has_services(&self) -> Result<(), AuthError> {
        let secret = self.config.secret.as_ref().ok_or_else(|| {
            AuthError::ServicesUnavailable(
                "no OAuth client configured; pass --client-id or provide client_secret.json"
                    .to_string(),
            )
        })?;
        if secret.client_id.is_empty() {
            return Err(AuthError::ServicesUnavailable(
                "OAuth client id is empty".to_string(),
            ));
        }
        if secret.auth_uri.is_empty() || secret.token_uri.is_empty() {
            return Err(AuthError::ServicesUnavailable(
                "OAuth client is missing its endpoints".to_string(),
            ));
        }
        if self.config.scopes.is_empty() {
            return Err(AuthError::ServicesUnavailable(
                "no scopes requested".to_string(),
            ));
        }
        Ok(())
    }

    async fn sign_in(&self) -> Result<SignedInUser, AuthError> {
        let secret = self
            .config
            .secret
            .clone()
            .ok_or_else(|| AuthError::ServicesUnavailable("no OAuth client configured".to_string()))?;
        let auth =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
                .build()
                .await
                .map_err(|e| AuthError::SignIn(e.to_string()))?;

        let scopes: Vec<&str> = self.config.scopes.iter().map(|s| s.as_str()).collect();
        let token = auth.token(&scopes).await.map_err(map_flow_error)?;
        Ok(SignedInUser {
            access_token: token.token().map(str::to_string),
            expires_at: token.expiration_time(),
        })
    }

    async fn get_tokens(&self, user: &SignedInUser) -> Result<Tokens, AuthError> {
        if let Some(expires_at) = user.expires_at {
            if let Ok(formatted) = expires_at.format(&Rfc3339) {
                debug!("access token expires at {}", formatted);
            }
        }
        user.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(|token| Tokens {
                access_token: token.to_string(),
            })
            .ok_or(AuthError::MissingToken)
    }
}

/// Drives the three sign-in steps in order, stopping at the first failure.
#[derive(Clone)]
pub struct AuthSession {
    provider: Arc<dyn OAuthProvider>,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn OAuthProvider>) -> Self {
        Self { provider }
    }

    pub async fn sign_in(&self) -> Result<AuthToken, AuthError> {
        self.provider.has_services().await?;
        let user = self.provider.sign_in().await?;
        let tokens = self.provider.get_tokens(&user).await?;
        if tokens.access_token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        info!("signed in to mail account");
        Ok(AuthToken::new(tokens.access_token))
    }
}
