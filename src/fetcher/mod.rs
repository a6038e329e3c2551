//! Storefront feed fetcher
//!
//! Performs one GET against the featured-categories endpoint, normalizes
//! the `specials` and `new_releases` sections, sorts the combined list by
//! discount descending, and publishes the result as a whole snapshot.
//!
//! Every failure mode returns a typed [`FetchError`]; the cache is only
//! touched on full success, so a failed tick leaves the previous snapshot
//! in place.

use crate::cache::DealsCache;
use crate::config::UpstreamConfig;
use crate::error::FetchError;
use crate::models::{Deal, FeaturedCategories, Section, Snapshot};
use crate::normalizer::{normalize, Source};
use reqwest::Client;

/// Fetcher for the storefront featured-categories feed
pub struct StoreFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Featured-categories endpoint URL
    endpoint: String,

    /// Locale code for the `l` query parameter
    locale: String,

    /// Country code for the `cc` query parameter
    country: String,
}

impl StoreFetcher {
    /// Create a fetcher from the upstream configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .build()
            .map_err(FetchError::Http)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            locale: config.locale.clone(),
            country: config.country.clone(),
        })
    }

    /// Create a fetcher pointed at a custom endpoint, for tests with mock
    /// servers
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_endpoint(config: &UpstreamConfig, endpoint: &str) -> Result<Self, FetchError> {
        let mut fetcher = Self::new(config)?;
        fetcher.endpoint = endpoint.to_string();
        Ok(fetcher)
    }

    /// Fetch and decode the raw featured-categories payload
    ///
    /// # Errors
    ///
    /// - `FetchError::Timeout` when the request exceeds the configured timeout
    /// - `FetchError::Http` for other transport failures
    /// - `FetchError::Status` for non-success upstream statuses
    /// - `FetchError::Malformed` when the body does not decode
    pub async fn fetch_featured(&self) -> Result<FeaturedCategories, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("l", self.locale.as_str()), ("cc", self.country.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let data: FeaturedCategories = serde_json::from_str(&body)?;
        Ok(data)
    }

    /// Perform one full refresh: fetch, normalize, sort, publish
    ///
    /// Returns the number of published items. On any error the cache is
    /// left untouched.
    pub async fn refresh(&self, cache: &DealsCache) -> Result<usize, FetchError> {
        let data = self.fetch_featured().await?;
        let items = assemble(&data);
        let count = items.len();

        cache.publish(Snapshot::new(items)).await;
        Ok(count)
    }
}

/// Normalize both sections and sort the combined list
///
/// Specials come before new releases; the sort is stable, so equal
/// discounts keep that relative order.
fn assemble(data: &FeaturedCategories) -> Vec<Deal> {
    let mut items: Vec<Deal> = section_items(&data.specials)
        .iter()
        .map(|raw| normalize(raw, Source::Specials))
        .chain(
            section_items(&data.new_releases)
                .iter()
                .map(|raw| normalize(raw, Source::NewReleases)),
        )
        .collect();

    items.sort_by(|a, b| b.discount_percent.cmp(&a.discount_percent));
    items
}

fn section_items(section: &Option<Section>) -> &[crate::models::RawItem] {
    section.as_ref().map(|s| s.items.as_slice()).unwrap_or(&[])
}
