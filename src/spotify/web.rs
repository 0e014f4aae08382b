use reqwest::Client;
use serde_json::Value;

use crate::{catalog::CatalogError, config};

/// Performs an authenticated GET against the Spotify Web API.
///
/// The JSON body is returned untouched so the proxy can hand it to its own
/// clients verbatim. Non-2xx answers become [`CatalogError::Status`] with the
/// raw body attached.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `token` - Valid application access token
/// * `path` - Path below the API base URL, without a leading slash (e.g. `tracks/{id}`)
/// * `query` - Query parameters, URL-encoded by the client
///
/// # Example
///
/// ```
/// let query = [("market", "US".to_string())];
/// let album = get_json(&client, &token, "albums/4yP0hdKOZPNshxUOjY0cZj", &query).await?;
/// ```
pub async fn get_json(
    client: &Client,
    token: &str,
    path: &str,
    query: &[(&str, String)],
) -> Result<Value, CatalogError> {
    let api_url = format!("{uri}/{path}", uri = config::spotify_apiurl(), path = path);

    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .query(query)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
