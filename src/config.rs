use crate::i18n::{ProfileRegistry, DEFAULT_PROFILE_ID};
use anyhow::{bail, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Sovereign profile selected by the host
    pub profile: String,

    // Static content
    pub content_base_url: String,
    pub content_fetch_max_attempts: u32,

    // Preferences (None disables persistence)
    pub preferences_file: Option<String>,

    // Catalogs (None uses the embedded catalogs)
    pub catalog_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE_ID.to_string(),
            content_base_url: "http://localhost:8080".to_string(),
            content_fetch_max_attempts: 1,
            preferences_file: Some(".sovereign/preferences.json".to_string()),
            catalog_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let profile =
            std::env::var("SOVEREIGN_PROFILE").unwrap_or_else(|_| defaults.profile.clone());
        if ProfileRegistry::get().get_by_id(&profile).is_none() {
            bail!("SOVEREIGN_PROFILE '{}' is not a known profile", profile);
        }

        Ok(Self {
            profile,

            // Static content
            content_base_url: std::env::var("CONTENT_BASE_URL")
                .unwrap_or(defaults.content_base_url),
            content_fetch_max_attempts: std::env::var("CONTENT_FETCH_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.content_fetch_max_attempts),

            // Empty PREFERENCES_FILE switches persistence off
            preferences_file: match std::env::var("PREFERENCES_FILE") {
                Ok(path) if path.trim().is_empty() => None,
                Ok(path) => Some(path),
                Err(_) => defaults.preferences_file,
            },

            catalog_dir: std::env::var("CATALOG_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty()),
        })
    }
}
