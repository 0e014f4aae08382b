use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    catalog::{CatalogError, CatalogSource, is_catalog_id},
    types::{
        Album, Artist, AudioFeatures, Paging, RelatedArtistsResponse, SearchAlbumsResponse,
        SearchArtistsResponse, SearchTracksResponse, TopTracksResponse, Track,
    },
};

/// Catalog source backed by the proxy service's `/spotify/*` endpoints.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}/spotify/{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

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
}

/// Returns `id` if it is safe to place in a URL path.
fn checked_id(id: &str) -> Result<&str, CatalogError> {
    if is_catalog_id(id) {
        Ok(id)
    } else {
        Err(CatalogError::InvalidId(id.to_string()))
    }
}

#[async_trait]
impl CatalogSource for ProxyClient {
    async fn search_tracks(
        &self,
        query: &str,
        limit: u32,
        market: Option<&str>,
    ) -> Result<Vec<Track>, CatalogError> {
        let mut params = vec![("q", query.to_string()), ("limit", limit.to_string())];
        if let Some(market) = market {
            params.push(("market", market.to_string()));
        }

        let res: SearchTracksResponse = self.get("search", &params).await?;
        Ok(res.tracks.unwrap_or_default().items)
    }

    async fn search_albums(&self, query: &str) -> Result<Vec<Album>, CatalogError> {
        let res: SearchAlbumsResponse = self
            .get("search-albums", &[("q", query.to_string())])
            .await?;
        Ok(res.albums.unwrap_or_default().items)
    }

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>, CatalogError> {
        let res: SearchArtistsResponse = self
            .get(
                "search-artists",
                &[("q", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;
        Ok(res.artists.unwrap_or_default().items)
    }

    async fn album(&self, id: &str) -> Result<Album, CatalogError> {
        self.get(&format!("albums/{}", checked_id(id)?), &[]).await
    }

    async fn track(&self, id: &str) -> Result<Track, CatalogError> {
        self.get(&format!("tracks/{}", checked_id(id)?), &[]).await
    }

    async fn audio_features(&self, id: &str) -> Result<AudioFeatures, CatalogError> {
        self.get(&format!("audio-features/{}", checked_id(id)?), &[]).await
    }

    async fn artist(&self, id: &str) -> Result<Artist, CatalogError> {
        self.get(&format!("artists/{}", checked_id(id)?), &[]).await
    }

    async fn artist_top_tracks(&self, id: &str, market: &str) -> Result<Vec<Track>, CatalogError> {
        let res: TopTracksResponse = self
            .get(
                &format!("artists/{}/top-tracks", checked_id(id)?),
                &[("market", market.to_string())],
            )
            .await?;
        Ok(res.tracks)
    }

    async fn related_artists(&self, id: &str) -> Result<Vec<Artist>, CatalogError> {
        let res: RelatedArtistsResponse = self
            .get(&format!("artists/{}/related-artists", checked_id(id)?), &[])
            .await?;
        Ok(res.artists)
    }

    async fn artist_albums(
        &self,
        id: &str,
        include_groups: &str,
        limit: u32,
    ) -> Result<Paging<Album>, CatalogError> {
        self.get(
            &format!("artists/{}/albums", checked_id(id)?),
            &[
                ("include_groups", include_groups.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }
}
