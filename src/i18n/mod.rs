//! Internationalization (i18n) module for multi-locale, multi-profile support.
//!
//! All locale metadata, sovereign branding, translation catalogs and
//! locale-aware formatting live here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales
//! - `locale`: Type-safe Locale type validated against the registry
//! - `profile`: Sovereign profiles (branding tokens and permitted locales)
//! - `catalog`: Nested translation catalogs, one per locale
//! - `translator`: `t()` lookup with raw-key fallback and placeholders
//! - `format`: Date, number and currency presets
//! - `validator`: Catalog completeness checks (test-time)
//! - `metrics`: Content and translation counters
//!
//! # Example
//!
//! ```rust,ignore
//! use sovereign_theming::i18n::{Locale, ProfileRegistry};
//!
//! let french = Locale::from_tag("fr-CA")?;
//! let canada = ProfileRegistry::get().default_profile();
//! assert!(canada.supports(french));
//! ```

pub mod catalog;
pub mod format;
mod locale;
mod metrics;
mod profile;
mod registry;
mod translator;
mod validator;

pub use catalog::{CatalogNode, CatalogSet};
pub use format::{DateStyle, NumberStyle};
pub use locale::Locale;
pub use metrics::{LocalizationMetrics, MetricsReport};
pub use profile::{
    ColorTokens, FooterLink, ProfileRegistry, SovereignProfile, Theme, DEFAULT_PROFILE_ID,
};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use translator::{interpolate, Translator};
pub use validator::{CatalogValidator, ValidationReport};
