use crate::i18n::{Locale, LocalizationMetrics};
use crate::retry::{with_retry_if, RetryConfig};
use crate::session::SessionHandle;
use anyhow::Context;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Optional structured metadata attached to a record.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One localized unit of page content.
///
/// `locale` is always the locale that was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub locale: Locale,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Payload shape served by the static content files.
///
/// Any `locale` field in the payload is ignored.
#[derive(Debug, Deserialize)]
struct RemoteContent {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    metadata: Option<Metadata>,
}

/// One language variant of a seeded page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedVariant {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// A seeded page with its two canonical variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSeed {
    pub path: String,
    pub en: SeedVariant,
    pub fr: SeedVariant,
}

impl ContentSeed {
    /// The variant for a locale's language family, if this seed has one.
    pub fn variant_for(&self, locale: Locale) -> Option<&SeedVariant> {
        match locale.language() {
            "en" => Some(&self.en),
            "fr" => Some(&self.fr),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content not found: {path} (HTTP {status})")]
    NotFound { path: String, status: u16 },

    #[error("content unavailable: {path}")]
    Unavailable {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed content at {path}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ContentError {
    /// The static resource path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            ContentError::NotFound { path, .. }
            | ContentError::Unavailable { path, .. }
            | ContentError::Malformed { path, .. } => path,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            ContentError::NotFound { status, .. } => *status == 429 || *status >= 500,
            ContentError::Unavailable { .. } => true,
            ContentError::Malformed { .. } => false,
        }
    }
}

/// Monotonic id of a tracked fetch. Later requests have larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Result of a tracked fetch, tagged with its request token.
#[derive(Debug)]
pub struct TrackedContent {
    pub token: RequestToken,
    pub result: Result<ContentRecord, ContentError>,
}

/// Static resource path for a content path (`/content/{lang}/{path}.json`).
pub fn resource_path(locale: Locale, path: &str) -> String {
    format!(
        "/content/{}/{}.json",
        locale.language(),
        path.trim_start_matches('/')
    )
}

pub struct ContentAdapter {
    client: reqwest::Client,
    base_url: String,
    seeds: HashMap<String, ContentSeed>,
    session: SessionHandle,
    retry: RetryConfig,
    metrics: Arc<LocalizationMetrics>,
    latest_token: AtomicU64,
}

impl ContentAdapter {
    /// Create an adapter fetching from `base_url` and defaulting to the
    /// session's locale.
    pub fn new(base_url: impl Into<String>, session: SessionHandle) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            seeds: HashMap::new(),
            session,
            retry: RetryConfig::content_fetch(),
            metrics: Arc::new(LocalizationMetrics::new()),
            latest_token: AtomicU64::new(0),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<LocalizationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<LocalizationMetrics> {
        &self.metrics
    }

    /// Add (or replace) a seeded page.
    pub fn seed(&mut self, seed: ContentSeed) {
        let key = seed.path.trim_start_matches('/').to_string();
        debug!("Seeded content for {}", key);
        self.seeds.insert(key, seed);
    }

    /// Add seeds from a JSON array of `ContentSeed` objects.
    pub fn seed_from_json(&mut self, json: &str) -> anyhow::Result<usize> {
        let seeds: Vec<ContentSeed> =
            serde_json::from_str(json).context("Failed to parse content seeds")?;
        let count = seeds.len();
        for seed in seeds {
            self.seed(seed);
        }
        Ok(count)
    }

    pub fn is_seeded(&self, path: &str) -> bool {
        self.seeds.contains_key(path.trim_start_matches('/'))
    }

    /// Resolve content for `path` in `locale` (or the session's locale).
    pub async fn fetch_content(
        &self,
        path: &str,
        locale: Option<Locale>,
    ) -> Result<ContentRecord, ContentError> {
        let locale = locale.unwrap_or_else(|| self.session.locale());
        let key = path.trim_start_matches('/');

        if let Some(variant) = self.seeds.get(key).and_then(|seed| seed.variant_for(locale)) {
            self.metrics.record_seed_hit();
            debug!("Serving {} ({}) from seed store", key, locale);
            return Ok(ContentRecord {
                id: key.to_string(),
                locale,
                title: variant.title.clone(),
                body: variant.body.clone(),
                metadata: variant.metadata.clone(),
            });
        }

        let resource = resource_path(locale, key);
        self.metrics.record_static_fetch();

        match self.fetch_static(&resource).await {
            Ok(remote) => Ok(ContentRecord {
                id: remote.id.unwrap_or_else(|| key.to_string()),
                locale,
                title: remote.title,
                body: remote.body,
                metadata: remote.metadata,
            }),
            Err(e) => {
                self.metrics.record_fetch_failure();
                warn!("Content fetch failed for {}: {}", resource, e);
                Err(e)
            }
        }
    }

    /// Like `fetch_content`, tagging the result with a request token.
    ///
    /// When several fetches overlap, use `is_latest` to drop responses that
    /// were superseded by a newer request.
    pub async fn fetch_tracked(&self, path: &str, locale: Option<Locale>) -> TrackedContent {
        let token = RequestToken(self.latest_token.fetch_add(1, Ordering::SeqCst) + 1);
        let result = self.fetch_content(path, locale).await;
        TrackedContent { token, result }
    }

    /// Whether `token` belongs to the most recent tracked fetch.
    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest_token.load(Ordering::SeqCst) == token.0
    }

    /// Fetch several paths concurrently. Results keep the input order.
    pub async fn prefetch(
        &self,
        paths: &[&str],
        locale: Option<Locale>,
    ) -> Vec<Result<ContentRecord, ContentError>> {
        join_all(paths.iter().map(|path| self.fetch_content(path, locale))).await
    }

    async fn fetch_static(&self, resource: &str) -> Result<RemoteContent, ContentError> {
        let client = &self.client;
        let url = format!("{}{}", self.base_url, resource);
        let url = url.as_str();

        with_retry_if(
            &self.retry,
            &format!("Content fetch {}", resource),
            || async move {
                let response =
                    client
                        .get(url)
                        .send()
                        .await
                        .map_err(|source| ContentError::Unavailable {
                            path: resource.to_string(),
                            source,
                        })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(ContentError::NotFound {
                        path: resource.to_string(),
                        status: status.as_u16(),
                    });
                }

                let body = response
                    .text()
                    .await
                    .map_err(|source| ContentError::Unavailable {
                        path: resource.to_string(),
                        source,
                    })?;

                serde_json::from_str::<RemoteContent>(&body).map_err(|source| ContentError::Malformed {
                    path: resource.to_string(),
                    source,
                })
            },
            ContentError::is_retryable,
        )
        .await
    }
}
