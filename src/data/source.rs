//! HTTP access to the valuation feed and the two per-entity pages.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::data::feed::parse_listing;
use crate::data::pages::{BiographyPage, ValuationPage, biography_url, valuation_url};
use crate::data::throttle::Throttle;
use crate::domain::EntityListing;
use crate::error::AppError;

const DEFAULT_FEED_URL: &str = "https://celebritybucks.com/developers/export/JSON";
const DEFAULT_VALUATION_BASE_URL: &str = "https://celebritybucks.com/celebrity";
const DEFAULT_BIOGRAPHY_BASE_URL: &str = "https://www.astro-seek.com/birth-chart";

/// Everything the driver needs from the outside world.
pub trait CelebritySource: Sync {
    /// Fetch the ranked listing. Any failure here is fatal for a run.
    fn fetch_listing(&self) -> Result<EntityListing, AppError>;

    fn fetch_valuation(&self, id: &str, name: &str) -> Result<ValuationPage, AppError>;

    fn fetch_biography(&self, name: &str) -> Result<BiographyPage, AppError>;
}

/// Endpoint locations and request spacing.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub feed_url: String,
    pub valuation_base_url: String,
    pub biography_base_url: String,
    pub user_agent: Option<String>,
    pub min_interval: Duration,
}

impl SourceConfig {
    /// Defaults, overridable through the environment (or `.env`).
    pub fn from_env(min_interval: Duration) -> Self {
        dotenvy::dotenv().ok();
        let var = |key: &str, default: &str| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            feed_url: var("CELEB_FEED_URL", DEFAULT_FEED_URL),
            valuation_base_url: var("CELEB_VALUATION_BASE_URL", DEFAULT_VALUATION_BASE_URL),
            biography_base_url: var("CELEB_BIOGRAPHY_BASE_URL", DEFAULT_BIOGRAPHY_BASE_URL),
            user_agent: std::env::var("CELEB_USER_AGENT").ok().filter(|v| !v.trim().is_empty()),
            min_interval,
        }
    }
}

pub struct HttpSource {
    client: Client,
    config: SourceConfig,
    // The feed and the valuation pages live on the same host.
    valuation_host: Throttle,
    biography_host: Throttle,
}

impl HttpSource {
    pub fn new(config: SourceConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            valuation_host: Throttle::new(config.min_interval),
            biography_host: Throttle::new(config.min_interval),
            config,
        })
    }

    fn get_page(&self, url: &str, throttle: &Throttle) -> Result<String, AppError> {
        throttle.wait();
        debug!(url = %url, "fetching page");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::upstream(format!("Request to {url} failed: {e}")))?;

        // Missing pages still carry markup the extractors know how to read.
        if !resp.status().is_success() {
            debug!(url = %url, status = %resp.status(), "page returned non-success status");
        }

        resp.text()
            .map_err(|e| AppError::upstream(format!("Failed to read body from {url}: {e}")))
    }
}

impl CelebritySource for HttpSource {
    fn fetch_listing(&self) -> Result<EntityListing, AppError> {
        self.valuation_host.wait();

        let resp = self.client.get(&self.config.feed_url).send().map_err(|e| {
            AppError::upstream(format!(
                "API request is NOT successful. Check https://celebritybucks.com/developers and your API query before retrying. ({e})"
            ))
        })?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "API request is NOT successful. Check https://celebritybucks.com/developers and your API query before retrying. (status {})",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::upstream(format!("Failed to read Celebrity Bucks feed: {e}")))?;
        let listing = parse_listing(&body)?;
        info!(entities = listing.len(), "fetched valuation feed");
        Ok(listing)
    }

    fn fetch_valuation(&self, id: &str, name: &str) -> Result<ValuationPage, AppError> {
        let url = valuation_url(&self.config.valuation_base_url, id, name);
        let body = self.get_page(&url, &self.valuation_host)?;
        ValuationPage::from_html(&body)
    }

    fn fetch_biography(&self, name: &str) -> Result<BiographyPage, AppError> {
        let url = biography_url(&self.config.biography_base_url, name);
        let body = self.get_page(&url, &self.biography_host)?;
        BiographyPage::from_html(&body)
    }
}
