//! Resolve the session for a page path and print the resulting theme.
//!
//! Usage:
//!   cargo run -- /fr/services/apply            # Resolve locale and theme
//!   cargo run -- /fr/services/apply welcome    # Also fetch content "welcome"
//!
//! Optional environment variables:
//! - SOVEREIGN_PROFILE (defaults to canada_gc)
//! - CONTENT_BASE_URL (defaults to http://localhost:8080)
//! - PREFERENCES_FILE (defaults to .sovereign/preferences.json, empty disables)
//! - CATALOG_DIR (defaults to the embedded catalogs)
//! - CONTENT_FETCH_MAX_ATTEMPTS (defaults to 1, raise to retry)

use anyhow::Result;
use sovereign_theming::{config::Config, Engine};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sovereign_theming=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let pathname = args.next();
    let content_path = args.next();

    let config = Config::from_env()?;
    let mut engine = Engine::from_config(&config)?;

    let _subscription = engine.service.subscribe(|event| {
        info!(
            "Change: {:?} -> {} / {} / dark={}",
            event.kind, event.locale, event.profile, event.dark_mode
        );
    });

    let state = engine.service.initialize(pathname.as_deref());
    let profile = engine.service.profile();
    let translator = &engine.translator;

    println!("{} {}", profile.flag, translator.t("app.title"));
    println!(
        "{}",
        translator.t_with("language.current", &[("language", state.locale.native_name())])
    );
    println!("{}", serde_json::to_string_pretty(&engine.service.theme())?);

    for link in profile.footer_links {
        println!("  {} <{}>", translator.t(link.label), link.url);
    }
    println!("  {}", profile.legal_text);

    let page = pathname.as_deref().unwrap_or("/");
    let internal = match sovereign_theming::LocaleService::resolve_from_url(page) {
        Some(_) => page
            .trim_start_matches('/')
            .split_once('/')
            .map(|(_, rest)| rest)
            .unwrap_or(""),
        None => page,
    };
    for (locale, url) in engine.service.alternate_urls(internal) {
        println!("  [{}] {}", locale.tag(), url);
    }

    if let Some(content_path) = content_path {
        match engine.content.fetch_content(&content_path, None).await {
            Ok(record) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            Err(e) => {
                warn!("{}", e);
                println!("{}", translator.t("content.unavailable"));
            }
        }
    }

    info!(
        "Metrics: {}",
        serde_json::to_string(&engine.metrics.report())?
    );
    Ok(())
}
