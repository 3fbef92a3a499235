//! Translation catalogs: nested key→string trees, one per locale.
//!
//! Catalogs are plain JSON objects whose leaves are strings. Arrays, numbers
//! and other non-string leaves are rejected at load time, so lookups only
//! ever see strings or sections.

use crate::i18n::{Locale, LocaleRegistry};
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// One node of a translation catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogNode {
    Text(String),
    Section(BTreeMap<String, CatalogNode>),
}

impl CatalogNode {
    /// Walk a dotted key (e.g., "footer.privacy") down the tree.
    ///
    /// Returns `None` when any segment is missing or the key stops at a
    /// section instead of a string.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut node = self;
        for segment in key.split('.') {
            match node {
                CatalogNode::Section(children) => node = children.get(segment)?,
                CatalogNode::Text(_) => return None,
            }
        }
        match node {
            CatalogNode::Text(text) => Some(text.as_str()),
            CatalogNode::Section(_) => None,
        }
    }

    /// All leaf keys in dotted form, sorted.
    pub fn leaf_keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        collect_keys(self, String::new(), &mut keys);
        keys
    }
}

fn collect_keys(node: &CatalogNode, prefix: String, keys: &mut BTreeSet<String>) {
    match node {
        CatalogNode::Text(_) => {
            keys.insert(prefix);
        }
        CatalogNode::Section(children) => {
            for (name, child) in children {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", prefix, name)
                };
                collect_keys(child, key, keys);
            }
        }
    }
}

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex matching `{name}` placeholders.
pub(crate) fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap())
}

/// Names of the `{name}` placeholders in a string.
pub fn placeholders(text: &str) -> BTreeSet<String> {
    placeholder_regex()
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Embedded catalogs shipped with the crate.
const EMBEDDED: &[(Locale, &str)] = &[
    (Locale::EN_CA, include_str!("../../locales/en-CA.json")),
    (Locale::FR_CA, include_str!("../../locales/fr-CA.json")),
    (Locale::EN_US, include_str!("../../locales/en-US.json")),
    (Locale::ES_US, include_str!("../../locales/es-US.json")),
    (Locale::EN_GB, include_str!("../../locales/en-GB.json")),
    (Locale::CY_GB, include_str!("../../locales/cy-GB.json")),
    (Locale::EN_NZ, include_str!("../../locales/en-NZ.json")),
    (Locale::MI_NZ, include_str!("../../locales/mi-NZ.json")),
];

/// The set of loaded catalogs, keyed by locale.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: HashMap<Locale, CatalogNode>,
}

impl CatalogSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalogs compiled into the crate.
    pub fn embedded() -> Result<Self> {
        let mut set = Self::new();
        for (locale, json) in EMBEDDED {
            set.insert_json(*locale, json)
                .with_context(|| format!("Failed to parse embedded catalog for {}", locale))?;
        }
        Ok(set)
    }

    /// Load `{dir}/{tag}.json` for every registered locale.
    ///
    /// Missing files are skipped with a warning; lookups for that locale will
    /// fall back to raw keys. Malformed files are an error.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut set = Self::new();

        for config in LocaleRegistry::get().list_all() {
            let path = dir.join(format!("{}.json", config.tag));
            if !path.exists() {
                warn!("No catalog for {} at {}", config.tag, path.display());
                continue;
            }
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            let locale = Locale::from_tag(config.tag)?;
            set.insert_json(locale, &json)
                .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
            debug!("Loaded catalog for {} from {}", config.tag, path.display());
        }

        Ok(set)
    }

    /// Parse and insert a catalog, replacing any existing one for `locale`.
    pub fn insert_json(&mut self, locale: Locale, json: &str) -> Result<()> {
        let root: CatalogNode =
            serde_json::from_str(json).context("Catalog leaves must be strings")?;
        self.insert(locale, root)
    }

    /// Insert a catalog tree. The root must be a section.
    pub fn insert(&mut self, locale: Locale, root: CatalogNode) -> Result<()> {
        if let CatalogNode::Text(_) = root {
            bail!("Catalog root for {} must be an object", locale);
        }
        self.catalogs.insert(locale, root);
        Ok(())
    }

    /// Get the catalog for a locale.
    pub fn get(&self, locale: Locale) -> Option<&CatalogNode> {
        self.catalogs.get(&locale)
    }

    /// Look up a dotted key in one locale's catalog.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.get(locale)?.lookup(key)
    }

    /// Locales with a loaded catalog.
    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<_> = self.catalogs.keys().copied().collect();
        locales.sort();
        locales
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
