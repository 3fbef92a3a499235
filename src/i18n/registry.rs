//! Locale registry: Single source of truth for all supported locales.
//!
//! This module provides a centralized registry of every locale the engine can
//! resolve. It uses a singleton pattern with `OnceLock` to ensure thread-safe
//! initialization and access. The table is immutable once built.

use std::sync::OnceLock;

/// Configuration for a supported locale.
///
/// Contains all metadata for a specific locale, including its tag, subtags,
/// names and the sovereign profile that owns it.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// BCP 47 tag (e.g., "en-CA", "fr-CA")
    pub tag: &'static str,

    /// ISO 639-1 language subtag (e.g., "en", "fr")
    pub language: &'static str,

    /// ISO 3166-1 region subtag (e.g., "CA", "US")
    pub region: &'static str,

    /// English name of the locale (e.g., "French (Canada)")
    pub name: &'static str,

    /// Native name of the locale (e.g., "Français (Canada)")
    pub native_name: &'static str,

    /// Id of the sovereign profile this locale belongs to
    pub profile: &'static str,

    /// Whether this is the default-region locale for its language.
    /// URL prefixes resolve to this locale (only one per language).
    pub canonical_for_language: bool,

    /// Display names keyed by the language they are written in
    pub display_names: &'static [(&'static str, &'static str)],
}

impl LocaleConfig {
    /// Get the display name of this locale written in `language`.
    ///
    /// Falls back to the English name when no entry exists.
    pub fn display_name(&self, language: &str) -> &'static str {
        self.display_names
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, name)| *name)
            .unwrap_or(self.name)
    }
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its tag.
    ///
    /// Matching is case-insensitive and accepts `_` as a separator, so
    /// `fr_ca` and `FR-CA` both find `fr-CA`.
    pub fn get_by_tag(&self, tag: &str) -> Option<&LocaleConfig> {
        let normalized = tag.trim().replace('_', "-");
        self.locales
            .iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(&normalized))
    }

    /// Get the default-region locale for a 2-letter language code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` for `en`, `fr`, `es`, `cy`, `mi`
    /// * `None` for any other code
    pub fn canonical_for_language(&self, language: &str) -> Option<&LocaleConfig> {
        self.locales
            .iter()
            .find(|locale| locale.canonical_for_language && locale.language == language)
    }

    /// Get all locales.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Check if a tag names a supported locale.
    pub fn is_supported(&self, tag: &str) -> bool {
        self.get_by_tag(tag).is_some()
    }
}

/// Default locale configurations.
///
/// Each sovereign profile owns one English locale and one locale in its
/// second official language.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            tag: "en-CA",
            language: "en",
            region: "CA",
            name: "English (Canada)",
            native_name: "English (Canada)",
            profile: "canada_gc",
            canonical_for_language: true,
            display_names: &[("en", "English (Canada)"), ("fr", "anglais (Canada)")],
        },
        LocaleConfig {
            tag: "fr-CA",
            language: "fr",
            region: "CA",
            name: "French (Canada)",
            native_name: "Français (Canada)",
            profile: "canada_gc",
            canonical_for_language: true,
            display_names: &[("en", "French (Canada)"), ("fr", "français (Canada)")],
        },
        LocaleConfig {
            tag: "en-US",
            language: "en",
            region: "US",
            name: "English (United States)",
            native_name: "English (United States)",
            profile: "usa_gov",
            canonical_for_language: false,
            display_names: &[
                ("en", "English (United States)"),
                ("es", "inglés (Estados Unidos)"),
            ],
        },
        LocaleConfig {
            tag: "es-US",
            language: "es",
            region: "US",
            name: "Spanish (United States)",
            native_name: "Español (Estados Unidos)",
            profile: "usa_gov",
            canonical_for_language: true,
            display_names: &[
                ("en", "Spanish (United States)"),
                ("es", "español (Estados Unidos)"),
            ],
        },
        LocaleConfig {
            tag: "en-GB",
            language: "en",
            region: "GB",
            name: "English (United Kingdom)",
            native_name: "English (United Kingdom)",
            profile: "uk_gov",
            canonical_for_language: false,
            display_names: &[
                ("en", "English (United Kingdom)"),
                ("cy", "Saesneg (Y Deyrnas Unedig)"),
            ],
        },
        LocaleConfig {
            tag: "cy-GB",
            language: "cy",
            region: "GB",
            name: "Welsh (United Kingdom)",
            native_name: "Cymraeg (Y Deyrnas Unedig)",
            profile: "uk_gov",
            canonical_for_language: true,
            display_names: &[
                ("en", "Welsh (United Kingdom)"),
                ("cy", "Cymraeg (Y Deyrnas Unedig)"),
            ],
        },
        LocaleConfig {
            tag: "en-NZ",
            language: "en",
            region: "NZ",
            name: "English (New Zealand)",
            native_name: "English (New Zealand)",
            profile: "nz_gov",
            canonical_for_language: false,
            display_names: &[
                ("en", "English (New Zealand)"),
                ("mi", "Reo Pākehā (Aotearoa)"),
            ],
        },
        LocaleConfig {
            tag: "mi-NZ",
            language: "mi",
            region: "NZ",
            name: "Māori (New Zealand)",
            native_name: "Te reo Māori (Aotearoa)",
            profile: "nz_gov",
            canonical_for_language: true,
            display_names: &[("en", "Māori (New Zealand)"), ("mi", "Te reo Māori (Aotearoa)")],
        },
    ]
}
