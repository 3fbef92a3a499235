use crate::broadcast::ChangeBus;
use crate::config::Config;
use crate::content::ContentAdapter;
use crate::i18n::{CatalogSet, LocalizationMetrics, Translator};
use crate::retry::RetryConfig;
use crate::session::LocaleService;
use crate::storage::{DisabledStore, FileStore, PreferenceStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

pub struct Engine {
    pub service: LocaleService,
    pub translator: Translator,
    pub content: ContentAdapter,
    pub metrics: Arc<LocalizationMetrics>,
}

impl Engine {
    /// Build an engine around an explicit store and catalog set.
    pub fn new(
        config: &Config,
        store: Arc<dyn PreferenceStore>,
        catalogs: CatalogSet,
    ) -> Result<Self> {
        let service = LocaleService::with_profile(&config.profile, store, ChangeBus::new())?;
        let metrics = Arc::new(LocalizationMetrics::new());

        let translator =
            Translator::new(Arc::new(catalogs), service.handle()).with_metrics(metrics.clone());

        let mut retry = RetryConfig::content_fetch();
        retry.max_attempts = config.content_fetch_max_attempts.max(1);
        let content = ContentAdapter::new(config.content_base_url.clone(), service.handle())
            .with_retry(retry)
            .with_metrics(metrics.clone());

        Ok(Self {
            service,
            translator,
            content,
            metrics,
        })
    }

    /// Build an engine from configuration: file-backed (or disabled)
    /// preferences and embedded (or on-disk) catalogs.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn PreferenceStore> = match &config.preferences_file {
            Some(path) => Arc::new(FileStore::new(path)),
            None => {
                info!("Preference persistence disabled");
                Arc::new(DisabledStore)
            }
        };

        let catalogs = match &config.catalog_dir {
            Some(dir) => CatalogSet::from_dir(dir)
                .with_context(|| format!("Failed to load catalogs from {}", dir))?,
            None => CatalogSet::embedded()?,
        };
        info!("Loaded {} translation catalogs", catalogs.len());

        Self::new(config, store, catalogs)
    }
}
