//! Translation resolver.
//!
//! `t()` never fails: a missing key (or a missing catalog) returns the key
//! itself so untranslated UI is visible without breaking rendering.

use crate::i18n::catalog::{placeholder_regex, CatalogSet};
use crate::i18n::format::{self, DateStyle, NumberStyle};
use crate::i18n::{Locale, LocalizationMetrics};
use crate::session::SessionHandle;
use chrono::NaiveDate;
use regex::Captures;
use std::sync::Arc;
use tracing::warn;

/// Key lookup and formatting bound to the session's current locale.
#[derive(Clone)]
pub struct Translator {
    catalogs: Arc<CatalogSet>,
    session: SessionHandle,
    metrics: Arc<LocalizationMetrics>,
}

impl Translator {
    pub fn new(catalogs: Arc<CatalogSet>, session: SessionHandle) -> Self {
        Self {
            catalogs,
            session,
            metrics: Arc::new(LocalizationMetrics::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<LocalizationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn locale(&self) -> Locale {
        self.session.locale()
    }

    /// Translate `key` in the current locale.
    pub fn t(&self, key: &str) -> String {
        self.t_in(self.locale(), key, &[])
    }

    /// Translate `key` in the current locale and fill `{name}` placeholders.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.t_in(self.locale(), key, params)
    }

    /// Translate `key` in an explicit locale.
    pub fn t_in(&self, locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
        match self.catalogs.lookup(locale, key) {
            Some(text) => interpolate(text, params),
            None => {
                self.metrics.record_key_miss();
                if self.catalogs.get(locale).is_none() {
                    warn!("No catalog loaded for {}; returning key '{}'", locale, key);
                } else {
                    warn!("Missing translation for '{}' in {}", key, locale);
                }
                key.to_string()
            }
        }
    }

    pub fn format_date(&self, date: NaiveDate, style: DateStyle) -> String {
        format::format_date(self.locale(), date, style)
    }

    pub fn format_number(&self, value: f64, style: NumberStyle) -> String {
        format::format_number(self.locale(), value, style)
    }

    pub fn format_currency(&self, amount: f64) -> String {
        format::format_currency(self.locale(), amount)
    }
}

/// Replace `{name}` placeholders with matching params. Placeholders without a
/// param are left intact.
pub fn interpolate(text: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return text.to_string();
    }
    placeholder_regex()
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            params
                .iter()
                .find(|(param, _)| *param == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use proptest::prelude::*;

    fn translator(locale: Locale) -> Translator {
        let catalogs = Arc::new(CatalogSet::embedded().expect("embedded catalogs"));
        let session = SessionHandle::fixed(SessionState {
            locale,
            ..SessionState::default()
        });
        Translator::new(catalogs, session)
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_t_resolves_nested_key() {
        assert_eq!(translator(Locale::FR_CA).t("footer.privacy"), "Confidentialité");
        assert_eq!(translator(Locale::CY_GB).t("theme.dark_mode"), "Modd tywyll");
    }

    #[test]
    fn test_t_missing_key_returns_key() {
        let translator = translator(Locale::EN_CA);
        assert_eq!(translator.t("footer.nonexistent"), "footer.nonexistent");
        assert_eq!(translator.t("footer"), "footer");
        assert_eq!(translator.metrics.key_misses(), 2);
    }

    #[test]
    fn test_t_missing_catalog_returns_key() {
        let session = SessionHandle::fixed(SessionState::default());
        let translator = Translator::new(Arc::new(CatalogSet::new()), session);
        assert_eq!(translator.t("app.title"), "app.title");
    }

    #[test]
    fn test_t_in_explicit_locale() {
        let translator = translator(Locale::EN_CA);
        assert_eq!(
            translator.t_in(Locale::ES_US, "content.loading", &[]),
            "Cargando…"
        );
    }

    // ==================== Interpolation Tests ====================

    #[test]
    fn test_t_with_substitutes_params() {
        let translator = translator(Locale::FR_CA);
        assert_eq!(
            translator.t_with("greeting", &[("name", "Amélie")]),
            "Bienvenue, Amélie !"
        );
    }

    #[test]
    fn test_unresolved_placeholders_left_intact() {
        assert_eq!(interpolate("{a} and {b}", &[("a", "1")]), "1 and {b}");
        assert_eq!(interpolate("{a}", &[]), "{a}");
    }

    #[test]
    fn test_params_not_applied_to_missing_key() {
        let translator = translator(Locale::EN_CA);
        assert_eq!(
            translator.t_with("missing.{name}", &[("name", "x")]),
            "missing.{name}"
        );
    }

    // ==================== Formatting Tests ====================

    #[test]
    fn test_formatting_follows_locale() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(
            translator(Locale::FR_CA).format_date(date, DateStyle::Long),
            "25 décembre 2024"
        );
        assert_eq!(
            translator(Locale::EN_US).format_number(1500.0, NumberStyle::Integer),
            "1,500"
        );
        assert_eq!(translator(Locale::EN_GB).format_currency(3.5), "£3.50");
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_unknown_keys_round_trip(segments in prop::collection::vec("[a-z]{1,8}", 1..4)) {
            let key = format!("zz_unknown.{}", segments.join("."));
            prop_assert_eq!(translator(Locale::EN_CA).t(&key), key);
        }
    }
}
