//! Catalog completeness validation.
//!
//! Compares a translation catalog against a reference catalog and reports
//! missing keys, extra keys and placeholder drift. This runs in tests and the
//! `catalog-audit` binary, never on the request path.

use crate::i18n::catalog::{placeholders, CatalogNode};

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys present in the reference but absent from the candidate
    pub errors: Vec<String>,

    /// Extra keys and placeholder mismatches
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog completeness.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validate that `candidate` translates everything in `reference`.
    ///
    /// This function checks that:
    /// - every reference key exists in the candidate (error)
    /// - the candidate has no keys the reference lacks (warning)
    /// - each translated string uses the same `{placeholders}` (warning)
    pub fn compare(reference: &CatalogNode, candidate: &CatalogNode) -> ValidationReport {
        let mut report = ValidationReport::new();

        let reference_keys = reference.leaf_keys();
        let candidate_keys = candidate.leaf_keys();

        for key in reference_keys.difference(&candidate_keys) {
            report.errors.push(format!("Missing key: {}", key));
        }

        for key in candidate_keys.difference(&reference_keys) {
            report.warnings.push(format!("Extra key: {}", key));
        }

        for key in reference_keys.intersection(&candidate_keys) {
            let (Some(original), Some(translated)) =
                (reference.lookup(key), candidate.lookup(key))
            else {
                continue;
            };
            let expected = placeholders(original);
            let actual = placeholders(translated);
            if expected != actual {
                report.warnings.push(format!(
                    "Placeholder mismatch for {}: reference has {:?}, translation has {:?}",
                    key, expected, actual
                ));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(json: &str) -> CatalogNode {
        serde_json::from_str(json).unwrap()
    }

    // ==================== Compare Tests ====================

    #[test]
    fn test_compare_identical_shape_is_clean() {
        let reference = catalog(r#"{"a": {"b": "Hello {name}"}, "c": "World"}"#);
        let candidate = catalog(r#"{"a": {"b": "Bonjour {name}"}, "c": "Monde"}"#);

        assert!(CatalogValidator::compare(&reference, &candidate).is_clean());
    }

    #[test]
    fn test_compare_missing_key() {
        let reference = catalog(r#"{"a": {"b": "Hello", "c": "Bye"}}"#);
        let candidate = catalog(r#"{"a": {"b": "Bonjour"}}"#);

        let report = CatalogValidator::compare(&reference, &candidate);
        assert!(report.has_errors());
        assert_eq!(report.errors, vec!["Missing key: a.c"]);
    }

    #[test]
    fn test_compare_extra_key() {
        let reference = catalog(r#"{"a": "Hello"}"#);
        let candidate = catalog(r#"{"a": "Bonjour", "z": "Extra"}"#);

        let report = CatalogValidator::compare(&reference, &candidate);
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("Extra key: z"));
    }

    #[test]
    fn test_compare_placeholder_mismatch() {
        let reference = catalog(r#"{"greeting": "Welcome, {name}!"}"#);
        let candidate = catalog(r#"{"greeting": "Bienvenue, {nom} !"}"#);

        let report = CatalogValidator::compare(&reference, &candidate);
        assert!(report.has_warnings());
        assert!(report.warnings[0].contains("Placeholder mismatch for greeting"));
    }

    #[test]
    fn test_section_replaced_by_leaf_is_missing() {
        let reference = catalog(r#"{"a": {"b": "Hello"}}"#);
        let candidate = catalog(r#"{"a": "Flat"}"#);

        let report = CatalogValidator::compare(&reference, &candidate);
        assert_eq!(report.errors, vec!["Missing key: a.b"]);
        assert_eq!(report.warnings, vec!["Extra key: a"]);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_validation_report_new() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_validation_report_with_error() {
        let mut report = ValidationReport::new();
        report.errors.push("Test error".to_string());

        assert!(!report.is_clean());
        assert!(report.has_errors());
        assert!(!report.has_warnings());
    }
}
