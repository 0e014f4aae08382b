use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use thiserror::Error;

use crate::{
    config,
    types::{Token, TokenResponse},
};

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN: u64 = 3600;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Missing SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET env vars")]
    MissingCredentials,
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("token endpoint responded with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("malformed token response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Requests an application access token with the client-credentials grant.
///
/// Reads the client ID and secret from the configuration and authenticates
/// with HTTP Basic auth against the token endpoint. The returned token is
/// stamped with the current time so callers can compute its expiry.
///
/// # Errors
///
/// - [`TokenError::MissingCredentials`] if either credential is unset
/// - [`TokenError::Rejected`] on a non-2xx answer (body kept for logging)
/// - [`TokenError::Request`] / [`TokenError::Decode`] on transport or parse failures
pub async fn request_app_token(client: &Client) -> Result<Token, TokenError> {
    let (Some(client_id), Some(client_secret)) =
        (config::spotify_client_id(), config::spotify_client_secret())
    else {
        return Err(TokenError::MissingCredentials);
    };

    let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));

    let res = client
        .post(config::spotify_apitoken_url())
        .header("Authorization", format!("Basic {}", credentials))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(TokenError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    let json: TokenResponse = serde_json::from_str(&body)?;

    Ok(Token {
        access_token: json.access_token,
        expires_in: json.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
