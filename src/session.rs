use crate::broadcast::{ChangeBus, ChangeEvent, ChangeKind, Subscription};
use crate::i18n::{Locale, ProfileRegistry, SovereignProfile, Theme, DEFAULT_PROFILE_ID};
use crate::storage::PreferenceStore;
use anyhow::{bail, Result};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Storage key holding the persisted locale tag.
pub const LOCALE_STORAGE_KEY: &str = "sovereign.locale";

/// Storage key holding the persisted dark-mode flag (`"true"`/`"false"`).
pub const DARK_MODE_STORAGE_KEY: &str = "sovereign.dark_mode";

/// The mutable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub locale: Locale,
    pub profile: &'static str,
    pub dark_mode: bool,
}

impl SessionState {
    /// Light-mode state at a profile's default locale.
    pub fn for_profile(profile: &SovereignProfile) -> Self {
        Self {
            locale: profile.default_locale,
            profile: profile.id,
            dark_mode: false,
        }
    }

    fn event(&self, kind: ChangeKind) -> ChangeEvent {
        ChangeEvent {
            kind,
            locale: self.locale,
            profile: self.profile,
            dark_mode: self.dark_mode,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            locale: Locale::EN_CA,
            profile: DEFAULT_PROFILE_ID,
            dark_mode: false,
        }
    }
}

fn profile_of(state: &SessionState) -> &'static SovereignProfile {
    let registry = ProfileRegistry::get();
    registry
        .get_by_id(state.profile)
        .unwrap_or_else(|| registry.default_profile())
}

/// Cloneable read-only view of the session state.
///
/// Handed to the content adapter and translator so they follow the active
/// locale without being able to change it.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<SessionState>>,
}

impl SessionHandle {
    /// A handle detached from any service, fixed at `state`.
    pub fn fixed(state: SessionState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn locale(&self) -> Locale {
        self.snapshot().locale
    }

    pub fn profile(&self) -> &'static SovereignProfile {
        profile_of(&self.snapshot())
    }

    pub fn dark_mode(&self) -> bool {
        self.snapshot().dark_mode
    }

    pub fn theme(&self) -> Theme {
        let state = self.snapshot();
        profile_of(&state).theme(state.dark_mode)
    }
}

/// The locale/theme state machine.
///
/// Every mutation runs update state, persist, broadcast in that order.
/// Storage failures are logged at debug level and otherwise ignored.
pub struct LocaleService {
    state: Arc<RwLock<SessionState>>,
    store: Arc<dyn PreferenceStore>,
    bus: ChangeBus,
}

impl LocaleService {
    /// Create a service in the default state (`en-CA` / `canada_gc` / light).
    pub fn new(store: Arc<dyn PreferenceStore>, bus: ChangeBus) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            store,
            bus,
        }
    }

    /// Create a service starting on a specific profile at its default locale.
    pub fn with_profile(
        profile_id: &str,
        store: Arc<dyn PreferenceStore>,
        bus: ChangeBus,
    ) -> Result<Self> {
        let Some(profile) = ProfileRegistry::get().get_by_id(profile_id) else {
            bail!("Unknown sovereign profile: '{}'", profile_id);
        };
        Ok(Self {
            state: Arc::new(RwLock::new(SessionState::for_profile(profile))),
            store,
            bus,
        })
    }

    /// Read-only view sharing this service's state.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Register a change callback. See `ChangeBus::subscribe`.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(callback)
    }

    pub fn state(&self) -> SessionState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current locale. Never fails.
    pub fn locale(&self) -> Locale {
        self.state().locale
    }

    pub fn profile(&self) -> &'static SovereignProfile {
        profile_of(&self.state())
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state().dark_mode
    }

    pub fn theme(&self) -> Theme {
        let state = self.state();
        profile_of(&state).theme(state.dark_mode)
    }

    /// Locales the current profile permits, in switcher order.
    pub fn available_locales(&self) -> &'static [Locale] {
        self.profile().available_locales
    }

    fn update<F: FnOnce(&mut SessionState)>(&self, mutate: F) -> SessionState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        mutate(&mut state);
        *state
    }

    /// Switch locale.
    ///
    /// Locales outside the current profile are rejected with a warning and
    /// the state is left unchanged. Returns whether the locale was applied.
    pub fn set_locale(&mut self, locale: Locale) -> bool {
        let profile = self.profile();
        if !profile.supports(locale) {
            warn!(
                "Rejected locale {}: not available for profile {}",
                locale, profile.id
            );
            return false;
        }

        let state = self.update(|state| state.locale = locale);
        self.persist(LOCALE_STORAGE_KEY, locale.tag());
        self.bus.publish(&state.event(ChangeKind::Locale));
        info!("Locale set to {}", locale);
        true
    }

    /// Switch locale by tag string. Unknown tags are rejected like
    /// unavailable locales.
    pub fn set_locale_tag(&mut self, tag: &str) -> bool {
        match Locale::from_tag(tag) {
            Ok(locale) => self.set_locale(locale),
            Err(e) => {
                warn!("Rejected locale: {}", e);
                false
            }
        }
    }

    /// Switch sovereign profile.
    ///
    /// If the current locale is not offered by the new profile it is replaced
    /// by the profile's default locale. Unknown ids are rejected.
    pub fn set_profile(&mut self, profile_id: &str) -> bool {
        let Some(profile) = ProfileRegistry::get().get_by_id(profile_id) else {
            warn!("Rejected profile: unknown id '{}'", profile_id);
            return false;
        };

        let previous = self.state();
        let state = self.update(|state| {
            state.profile = profile.id;
            if !profile.supports(state.locale) {
                state.locale = profile.default_locale;
            }
        });

        if state.locale != previous.locale {
            info!(
                "Locale {} not available for {}, falling back to {}",
                previous.locale, profile.id, state.locale
            );
            self.persist(LOCALE_STORAGE_KEY, state.locale.tag());
        }
        self.bus.publish(&state.event(ChangeKind::Profile));
        info!("Profile set to {}", profile.id);
        true
    }

    /// Flip dark mode. Returns the new flag.
    pub fn toggle_dark_mode(&mut self) -> bool {
        let state = self.update(|state| state.dark_mode = !state.dark_mode);
        self.persist(DARK_MODE_STORAGE_KEY, if state.dark_mode { "true" } else { "false" });
        self.bus.publish(&state.event(ChangeKind::DarkMode));
        debug!("Dark mode {}", if state.dark_mode { "on" } else { "off" });
        state.dark_mode
    }

    /// Reset to the current profile's defaults and forget persisted overrides.
    pub fn clear(&mut self) {
        let state = self.update(|state| *state = SessionState::for_profile(profile_of(state)));
        self.forget(LOCALE_STORAGE_KEY);
        self.forget(DARK_MODE_STORAGE_KEY);
        self.bus.publish(&state.event(ChangeKind::Reset));
        info!("Session reset to {} / {}", state.profile, state.locale);
    }

    /// Resolve the startup state.
    ///
    /// The persisted dark mode and locale are applied first, then a language
    /// prefix in `current_path` overrides the locale.
    pub fn initialize(&mut self, current_path: Option<&str>) -> SessionState {
        if let Some(flag) = self.read_preference(DARK_MODE_STORAGE_KEY) {
            let dark_mode = flag == "true";
            if dark_mode != self.is_dark_mode() {
                let state = self.update(|state| state.dark_mode = dark_mode);
                self.bus.publish(&state.event(ChangeKind::DarkMode));
            }
        }

        if let Some(tag) = self.read_preference(LOCALE_STORAGE_KEY) {
            debug!("Restoring persisted locale {}", tag);
            self.set_locale_tag(&tag);
        }

        if let Some(requested) = current_path.and_then(Self::resolve_from_url) {
            let profile = self.profile();
            let locale = if profile.supports(requested) {
                Some(requested)
            } else {
                profile.locale_for_language(requested.language())
            };
            match locale {
                Some(locale) if locale != self.locale() => {
                    self.set_locale(locale);
                }
                Some(_) => {}
                None => warn!(
                    "URL language '{}' is not offered by profile {}",
                    requested.language(),
                    profile.id
                ),
            }
        }

        let state = self.state();
        info!(
            "Session initialized: {} / {} / {}",
            state.profile,
            state.locale,
            if state.dark_mode { "dark" } else { "light" }
        );
        state
    }

    /// Parse the leading `/{lang}/` segment of a path.
    ///
    /// Returns the default-region locale for recognized 2-letter codes, or
    /// `None` when the prefix is absent or unknown. Pure.
    pub fn resolve_from_url(pathname: &str) -> Option<Locale> {
        let first = pathname.trim_start_matches('/').split(['/', '?', '#']).next()?;
        if first.len() != 2 || !first.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Locale::canonical_for(first)
    }

    /// Build the public URL for an internal path, in `locale` or the current
    /// locale.
    pub fn build_url(&self, path: &str, locale: Option<Locale>) -> String {
        build_localized_url(path, locale.unwrap_or_else(|| self.locale()))
    }

    /// One URL per locale of the current profile, for language switchers and
    /// alternate-language links.
    pub fn alternate_urls(&self, path: &str) -> Vec<(Locale, String)> {
        self.available_locales()
            .iter()
            .map(|locale| (*locale, build_localized_url(path, *locale)))
            .collect()
    }

    fn read_preference(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                debug!("Could not read preference {}: {}", key, e);
                None
            }
        }
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            debug!("Could not persist preference {}: {}", key, e);
        }
    }

    fn forget(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            debug!("Could not remove preference {}: {}", key, e);
        }
    }
}

/// `/{lang}/{path}` with any leading slashes of `path` stripped. Pure.
pub fn build_localized_url(path: &str, locale: Locale) -> String {
    format!("/{}/{}", locale.language(), path.trim_start_matches('/'))
}
