//! Catalog audit binary - compares every translation catalog to a reference
//!
//! Usage:
//!   cargo run --bin catalog-audit              # Compare against en-CA
//!   cargo run --bin catalog-audit -- en-GB     # Compare against en-GB
//!
//! Optional:
//! - CATALOG_DIR (defaults to the embedded catalogs)
//!
//! Exits with status 1 when any catalog is missing keys.

use anyhow::{Context, Result};
use sovereign_theming::i18n::{CatalogSet, CatalogValidator, Locale};
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sovereign_theming=info".parse()?),
        )
        .init();

    let reference_tag = std::env::args().nth(1).unwrap_or_else(|| "en-CA".to_string());
    let reference_locale = Locale::from_tag(&reference_tag)?;

    let catalogs = match std::env::var("CATALOG_DIR") {
        Ok(dir) => CatalogSet::from_dir(&dir)
            .with_context(|| format!("Failed to load catalogs from {}", dir))?,
        Err(_) => CatalogSet::embedded()?,
    };

    let reference = catalogs
        .get(reference_locale)
        .with_context(|| format!("No catalog loaded for reference {}", reference_locale))?;
    info!(
        "Auditing {} catalogs against {} ({} keys)",
        catalogs.len(),
        reference_locale,
        reference.leaf_keys().len()
    );

    let mut failed = false;
    for locale in catalogs.locales() {
        if locale == reference_locale {
            continue;
        }
        let Some(candidate) = catalogs.get(locale) else {
            continue;
        };

        let report = CatalogValidator::compare(reference, candidate);
        if report.is_clean() {
            println!("{}: ok", locale);
            continue;
        }

        println!("{}:", locale);
        for error in &report.errors {
            println!("  error: {}", error);
        }
        for warning in &report.warnings {
            println!("  warning: {}", warning);
        }
        failed |= report.has_errors();
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
