use chrono::Utc;
use reqwest::Client;

use crate::{
    spotify::{self, auth::TokenError},
    types::Token,
};

/// Seconds before the reported expiry at which a token stops being reused.
const EXPIRY_MARGIN_SECS: u64 = 60;

impl Token {
    /// Whether the token must be replaced at `now` (unix seconds).
    pub fn is_expired_at(&self, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.obtained_at + self.expires_in
    }
}

/// Process-wide cache of the application access token.
///
/// The manager owns at most one token. [`TokenManager::get_valid_token`]
/// reuses it until it is about to expire and requests a new one otherwise.
/// Share it between request handlers as `Arc<tokio::sync::Mutex<TokenManager>>`.
pub struct TokenManager {
    token: Option<Token>,
    client: Client,
}

impl TokenManager {
    pub fn new() -> Self {
        TokenManager {
            token: None,
            client: Client::new(),
        }
    }

    pub fn with_token(token: Token) -> Self {
        TokenManager {
            token: Some(token),
            client: Client::new(),
        }
    }

    pub async fn get_valid_token(&mut self) -> Result<String, TokenError> {
        self.refresh_if_expired().await?;
        self.token
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or(TokenError::MissingCredentials)
    }

    /// Replaces the cached token when it is missing or expired.
    ///
    /// Returns `true` if a new token was fetched.
    pub async fn refresh_if_expired(&mut self) -> Result<bool, TokenError> {
        if !self.is_expired() {
            return Ok(false);
        }

        let token = spotify::auth::request_app_token(&self.client).await?;
        self.token = Some(token);
        Ok(true)
    }

    /// A missing token counts as expired.
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        self.token.as_ref().is_none_or(|t| t.is_expired_at(now))
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}
