// Trait seams for the forecast pipeline's collaborators.
//
// SignalSearch and PlaceResolver keep the pipeline testable with
// in-memory stubs: no network, no live APIs, `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;
use civicweather_common::Observation;
use gdelt_client::GdeltClient;
use nominatim_client::NominatimClient;

#[async_trait]
pub trait SignalSearch: Send + Sync {
    /// Observations matching the topic query for a place within the
    /// window. Failures bubble up; the pipeline decides how to degrade.
    async fn observations(&self, place: &str, hours_back: u32) -> Result<Vec<Observation>>;
}

#[async_trait]
pub trait PlaceResolver: Send + Sync {
    /// `Ok(None)` means the place is unknown to the resolver.
    async fn resolve(&self, place: &str) -> Result<Option<(f64, f64)>>;
}

/// Production SignalSearch over the GDELT article list.
pub struct GdeltSignalSearch {
    client: GdeltClient,
    topic_query: String,
    max_articles: u32,
}

impl GdeltSignalSearch {
    pub fn new(client: GdeltClient, topic_query: String, max_articles: u32) -> Self {
        Self {
            client,
            topic_query,
            max_articles,
        }
    }
}

#[async_trait]
impl SignalSearch for GdeltSignalSearch {
    async fn observations(&self, place: &str, hours_back: u32) -> Result<Vec<Observation>> {
        let obs = self
            .client
            .article_list(&self.topic_query, place, hours_back, self.max_articles)
            .await?;
        Ok(obs)
    }
}

/// Production PlaceResolver over Nominatim.
pub struct NominatimResolver {
    client: NominatimClient,
}

impl NominatimResolver {
    pub fn new(client: NominatimClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PlaceResolver for NominatimResolver {
    async fn resolve(&self, place: &str) -> Result<Option<(f64, f64)>> {
        let coords = self.client.geocode(place).await?;
        Ok(coords.map(|c| (c.lat, c.lng)))
    }
}
