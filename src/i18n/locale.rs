//! Locale type: Validated language + region representation.
//!
//! A `Locale` can only be constructed for tags present in the registry, so
//! holding one is proof that the tag is supported.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    /// Registry tag (e.g., "en-CA", "fr-CA")
    tag: &'static str,
}

impl Locale {
    pub const EN_CA: Locale = Locale { tag: "en-CA" };
    pub const FR_CA: Locale = Locale { tag: "fr-CA" };
    pub const EN_US: Locale = Locale { tag: "en-US" };
    pub const ES_US: Locale = Locale { tag: "es-US" };
    pub const EN_GB: Locale = Locale { tag: "en-GB" };
    pub const CY_GB: Locale = Locale { tag: "cy-GB" };
    pub const EN_NZ: Locale = Locale { tag: "en-NZ" };
    pub const MI_NZ: Locale = Locale { tag: "mi-NZ" };

    /// Create a Locale from a tag string.
    ///
    /// # Arguments
    /// * `tag` - The locale tag (e.g., "fr-CA"). Case and `_`/`-` are normalized.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the tag is in the registry
    /// * `Err` if the tag is unknown
    pub fn from_tag(tag: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_tag(tag) {
            Some(config) => Ok(Locale { tag: config.tag }),
            None => bail!("Unknown locale tag: '{}'", tag),
        }
    }

    /// Get the default-region locale for a 2-letter language code.
    ///
    /// `en` maps to `en-CA`, `fr` to `fr-CA`, `es` to `es-US`, `cy` to
    /// `cy-GB` and `mi` to `mi-NZ`. Codes are matched case-insensitively.
    pub fn canonical_for(language: &str) -> Option<Locale> {
        let language = language.to_ascii_lowercase();
        LocaleRegistry::get()
            .canonical_for_language(&language)
            .map(|config| Locale { tag: config.tag })
    }

    /// Get the locale tag (e.g., "en-CA").
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the tag is not found in the registry. This should never
    /// happen if the Locale was constructed properly (via `from_tag` or
    /// constants).
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_tag(self.tag)
            .expect("Locale tag should always be valid")
    }

    /// ISO 639-1 language subtag (e.g., "fr").
    pub fn language(&self) -> &'static str {
        self.config().language
    }

    /// ISO 3166-1 region subtag (e.g., "CA").
    pub fn region(&self) -> &'static str {
        self.config().region
    }

    /// English name of the locale.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the locale.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Display name of this locale written in `language`.
    pub fn display_name(&self, language: &str) -> &'static str {
        self.config().display_name(language)
    }

    /// Id of the sovereign profile that owns this locale.
    pub fn profile_id(&self) -> &'static str {
        self.config().profile
    }

    /// The default-region locale of this locale's language family.
    pub fn canonical(&self) -> Locale {
        Locale::canonical_for(self.language()).unwrap_or(*self)
    }

    /// Check if this is the default-region locale for its language.
    pub fn is_canonical(&self) -> bool {
        self.config().canonical_for_language
    }

    /// Check if both locales share a language subtag.
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language() == other.language()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::EN_CA
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Locale::from_tag(&tag).map_err(serde::de::Error::custom)
    }
}
