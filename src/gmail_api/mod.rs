//! Gmail access split into logical submodules:
//! - auth: OAuth client configuration and the sign-in sequence
//! - messages: listing recent messages and fetching their details

pub mod auth;
pub mod messages;

pub use auth::{
    AuthConfig, AuthError, AuthSession, AuthToken, GoogleOAuthProvider, OAuthProvider,
    SignedInUser, Tokens, GMAIL_READONLY_SCOPE,
};
pub use messages::{MailRetriever, DEFAULT_MAIL_LIMIT, GMAIL_API_BASE};

#[cfg(test)]
pub use auth::MockOAuthProvider;
