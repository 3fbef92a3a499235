//! Integration tests for the sovereign localization and theming engine
//!
//! These tests drive the public API end to end: session resolution, URL
//! helpers, persistence across service instances, content lookup and the
//! shipped translation catalogs.

use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use sovereign_theming::{
    config::Config,
    i18n::{CatalogSet, CatalogValidator, Locale, ProfileRegistry},
    retry::RetryConfig,
    session::build_localized_url,
    ChangeBus, ChangeKind, ContentAdapter, ContentError, ContentSeed, Engine, FileStore,
    LocaleService, MemoryStore, SeedVariant, SessionHandle, SessionState,
};

// ==================== Test Helpers ====================

fn welcome_seed() -> ContentSeed {
    ContentSeed {
        path: "welcome".to_string(),
        en: SeedVariant {
            title: "Welcome".to_string(),
            body: "Find services and information.".to_string(),
            metadata: None,
        },
        fr: SeedVariant {
            title: "Bienvenue".to_string(),
            body: "Trouvez des services et de l'information.".to_string(),
            metadata: None,
        },
    }
}

/// Engine on an in-memory store, fetching static content from `base_url`
fn create_test_engine(base_url: &str) -> Engine {
    let config = Config {
        content_base_url: base_url.to_string(),
        content_fetch_max_attempts: 1,
        preferences_file: None,
        ..Config::default()
    };
    Engine::new(
        &config,
        Arc::new(MemoryStore::new()),
        CatalogSet::embedded().expect("embedded catalogs"),
    )
    .expect("engine")
}

fn file_backed_service(temp_dir: &TempDir) -> LocaleService {
    let store = FileStore::new(temp_dir.path().join("prefs").join("preferences.json"));
    LocaleService::new(Arc::new(store), ChangeBus::new())
}

// ==================== Locale Switching Tests ====================

#[tokio::test]
async fn test_switching_locale_changes_seeded_content() {
    let mut engine = create_test_engine("http://127.0.0.1:9");
    engine.content.seed(welcome_seed());

    let english = engine.content.fetch_content("welcome", None).await.unwrap();
    assert_eq!(english.title, "Welcome");
    assert_eq!(english.locale, Locale::EN_CA);

    assert!(engine.service.set_locale(Locale::FR_CA));

    let french = engine.content.fetch_content("welcome", None).await.unwrap();
    assert_eq!(french.title, "Bienvenue");
    assert_eq!(french.locale, Locale::FR_CA);
    assert_eq!(engine.metrics.seed_hits(), 2);
    assert_eq!(engine.metrics.static_fetches(), 0);
}

#[test]
fn test_switching_locale_changes_translations() {
    let mut engine = create_test_engine("http://127.0.0.1:9");
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let _subscription = engine
        .service
        .subscribe(move |event| sink.lock().unwrap().push(*event));

    assert_eq!(engine.translator.t("footer.privacy"), "Privacy");
    engine.service.set_locale(Locale::FR_CA);
    assert_eq!(engine.translator.t("footer.privacy"), "Confidentialité");
    assert_eq!(
        engine.translator.t_with("greeting", &[("name", "Alex")]),
        "Bienvenue, Alex !"
    );

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, ChangeKind::Locale);
    assert_eq!(events[0].locale, Locale::FR_CA);
}

#[test]
fn test_locale_outside_profile_is_rejected() {
    let mut engine = create_test_engine("http://127.0.0.1:9");

    assert!(!engine.service.set_locale(Locale::CY_GB));
    assert!(!engine.service.set_locale_tag("xx-XX"));
    assert_eq!(engine.service.locale(), Locale::EN_CA);
}

#[test]
fn test_profile_switch_falls_back_to_default_locale() {
    let mut engine = create_test_engine("http://127.0.0.1:9");
    engine.service.set_locale(Locale::FR_CA);

    assert!(engine.service.set_profile("uk_gov"));
    assert_eq!(engine.service.locale(), Locale::EN_GB);
    assert_eq!(engine.service.theme().profile, "uk_gov");
    assert_eq!(engine.translator.locale(), Locale::EN_GB);
}

// ==================== URL Helper Tests ====================

#[test]
fn test_resolve_from_url() {
    assert_eq!(
        LocaleService::resolve_from_url("/fr/services"),
        Some(Locale::FR_CA)
    );
    assert_eq!(LocaleService::resolve_from_url("/en"), Some(Locale::EN_CA));
    assert_eq!(
        LocaleService::resolve_from_url("/es/?q=1"),
        Some(Locale::ES_US)
    );
    assert_eq!(LocaleService::resolve_from_url("/services/fr"), None);
    assert_eq!(LocaleService::resolve_from_url("/de/page"), None);
    assert_eq!(LocaleService::resolve_from_url("/"), None);
    assert_eq!(LocaleService::resolve_from_url(""), None);
}

#[test]
fn test_build_url_uses_current_locale() {
    let mut engine = create_test_engine("http://127.0.0.1:9");

    assert_eq!(engine.service.build_url("/welcome", None), "/en/welcome");
    assert_eq!(
        engine.service.build_url("welcome", Some(Locale::FR_CA)),
        "/fr/welcome"
    );

    engine.service.set_locale(Locale::FR_CA);
    assert_eq!(engine.service.build_url("/welcome", None), "/fr/welcome");
}

#[test]
fn test_alternate_urls_follow_profile() {
    let mut engine = create_test_engine("http://127.0.0.1:9");
    engine.service.set_profile("nz_gov");

    let urls = engine.service.alternate_urls("/about");
    assert_eq!(
        urls,
        vec![
            (Locale::EN_NZ, "/en/about".to_string()),
            (Locale::MI_NZ, "/mi/about".to_string()),
        ]
    );
}

proptest! {
    #[test]
    fn prop_build_then_resolve_returns_language(
        locale in prop::sample::select(vec![
            Locale::EN_CA, Locale::FR_CA, Locale::EN_US, Locale::ES_US,
            Locale::EN_GB, Locale::CY_GB, Locale::EN_NZ, Locale::MI_NZ,
        ]),
        page in "[a-z0-9]{1,10}(/[a-z0-9]{1,10}){0,3}",
    ) {
        let url = build_localized_url(&page, locale);
        let resolved = LocaleService::resolve_from_url(&url);
        prop_assert_eq!(resolved, Some(locale.canonical()));
        prop_assert!(resolved.map(|r| r.same_language(&locale)).unwrap_or(false));
    }
}

// ==================== Initialization Tests ====================

#[test]
fn test_initialize_defaults_without_preferences() {
    let temp_dir = TempDir::new().expect("temp dir");
    let mut service = file_backed_service(&temp_dir);

    let state = service.initialize(None);
    assert_eq!(state.locale, Locale::EN_CA);
    assert_eq!(state.profile, "canada_gc");
    assert!(!state.dark_mode);
}

#[test]
fn test_initialize_restores_persisted_preferences() {
    let temp_dir = TempDir::new().expect("temp dir");
    {
        let mut first = file_backed_service(&temp_dir);
        first.set_locale(Locale::FR_CA);
        first.toggle_dark_mode();
    }

    let mut second = file_backed_service(&temp_dir);
    let state = second.initialize(None);
    assert_eq!(state.locale, Locale::FR_CA);
    assert!(state.dark_mode);
    assert_eq!(second.theme().colors, second.profile().dark_colors);
}

#[test]
fn test_initialize_url_overrides_persisted_locale() {
    let temp_dir = TempDir::new().expect("temp dir");
    {
        let mut first = file_backed_service(&temp_dir);
        first.set_locale(Locale::FR_CA);
    }

    let mut second = file_backed_service(&temp_dir);
    let state = second.initialize(Some("/en/services"));
    assert_eq!(state.locale, Locale::EN_CA);

    // The URL choice is persisted for the next session
    let mut third = file_backed_service(&temp_dir);
    assert_eq!(third.initialize(None).locale, Locale::EN_CA);
}

#[test]
fn test_clear_forgets_persisted_preferences() {
    let temp_dir = TempDir::new().expect("temp dir");
    {
        let mut first = file_backed_service(&temp_dir);
        first.set_locale(Locale::FR_CA);
        first.toggle_dark_mode();
        first.clear();
    }

    let mut second = file_backed_service(&temp_dir);
    let state = second.initialize(None);
    assert_eq!(state.locale, Locale::EN_CA);
    assert!(!state.dark_mode);
}

// ==================== Content Fetch Tests ====================

#[tokio::test]
async fn test_unseeded_content_is_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/fr/services/apply.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"title": "Présenter une demande", "body": "Étapes", "locale": "en-CA"}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut engine = create_test_engine(&mock_server.uri());
    engine.service.set_locale(Locale::FR_CA);

    let record = engine
        .content
        .fetch_content("/services/apply", None)
        .await
        .expect("content");

    assert_eq!(record.id, "services/apply");
    assert_eq!(record.title, "Présenter une demande");
    assert_eq!(record.locale, Locale::FR_CA);
    assert_eq!(engine.metrics.static_fetches(), 1);
}

#[tokio::test]
async fn test_missing_content_returns_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/en/missing.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = create_test_engine(&mock_server.uri());
    let error = engine
        .content
        .fetch_content("missing", None)
        .await
        .unwrap_err();

    match &error {
        ContentError::NotFound { path, status } => {
            assert_eq!(path, "/content/en/missing.json");
            assert_eq!(*status, 404);
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert_eq!(engine.metrics.fetch_failures(), 1);

    // Callers render the localized fallback string
    assert_eq!(
        engine.translator.t("content.unavailable"),
        "This content is not available."
    );
}

#[tokio::test]
async fn test_default_engine_fetches_failing_content_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/en/flaky.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = Config {
        content_base_url: mock_server.uri(),
        preferences_file: None,
        ..Config::default()
    };
    let engine = Engine::new(
        &config,
        Arc::new(MemoryStore::new()),
        CatalogSet::embedded().expect("embedded catalogs"),
    )
    .expect("engine");

    let error = engine.content.fetch_content("flaky", None).await.unwrap_err();
    assert!(matches!(error, ContentError::NotFound { status: 503, .. }));

    let requests = mock_server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_seed_without_language_variant_falls_through_to_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/es/welcome.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"title": "Bienvenido"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = SessionHandle::fixed(SessionState {
        locale: Locale::ES_US,
        profile: "usa_gov",
        dark_mode: false,
    });
    let mut adapter =
        ContentAdapter::new(mock_server.uri(), session).with_retry(RetryConfig::no_retry());
    adapter.seed(welcome_seed());

    let record = adapter.fetch_content("welcome", None).await.expect("content");
    assert_eq!(record.title, "Bienvenido");
    assert_eq!(record.locale, Locale::ES_US);
}

// ==================== Catalog Tests ====================

#[test]
fn test_embedded_catalogs_are_complete() {
    let catalogs = CatalogSet::embedded().expect("embedded catalogs");
    let reference = catalogs.get(Locale::EN_CA).expect("en-CA catalog");

    for locale in catalogs.locales() {
        let candidate = catalogs.get(locale).expect("catalog");
        let report = CatalogValidator::compare(reference, candidate);
        assert!(
            report.is_clean(),
            "{} catalog has issues: {:?} {:?}",
            locale,
            report.errors,
            report.warnings
        );
    }
}

#[test]
fn test_every_profile_locale_has_a_catalog() {
    let catalogs = CatalogSet::embedded().expect("embedded catalogs");

    for profile in ProfileRegistry::get().list_all() {
        for locale in profile.available_locales {
            assert!(
                catalogs.get(*locale).is_some(),
                "{} has no catalog for {}",
                profile.id,
                locale
            );
        }
        for link in profile.footer_links {
            for locale in profile.available_locales {
                assert!(
                    catalogs.lookup(*locale, link.label).is_some(),
                    "{} footer label {} missing in {}",
                    profile.id,
                    link.label,
                    locale
                );
            }
        }
    }
}

// ==================== Profile Tests ====================

#[test]
fn test_profile_invariants() {
    let profiles = ProfileRegistry::get().list_all();
    assert_eq!(profiles.len(), 4);

    for profile in profiles {
        assert!(!profile.available_locales.is_empty());
        assert!(profile.supports(profile.default_locale));
        for locale in profile.available_locales {
            assert_eq!(locale.profile_id(), profile.id);
        }
    }
}

#[test]
fn test_dark_mode_toggle_switches_theme_colors() {
    let mut engine = create_test_engine("http://127.0.0.1:9");
    let light = engine.service.theme();

    assert!(engine.service.toggle_dark_mode());
    let dark = engine.service.theme();

    assert!(dark.dark_mode);
    assert_ne!(light.colors, dark.colors);
    assert!(!engine.service.toggle_dark_mode());
    assert_eq!(engine.service.theme(), light);
}
