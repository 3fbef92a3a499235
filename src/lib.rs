//! Sovereign localization and theming engine.
//!
//! Resolves the active locale and sovereign theme for a page, persists the
//! user's choice, serves localized content and broadcasts every change to
//! subscribed consumers.

pub mod broadcast;
pub mod config;
pub mod content;
pub mod engine;
pub mod i18n;
pub mod retry;
pub mod session;
pub mod storage;

pub use broadcast::{ChangeBus, ChangeEvent, ChangeKind, Subscription};
pub use content::{ContentAdapter, ContentError, ContentRecord, ContentSeed, SeedVariant};
pub use engine::Engine;
pub use i18n::{Locale, SovereignProfile, Theme, Translator};
pub use session::{LocaleService, SessionHandle, SessionState};
pub use storage::{FileStore, MemoryStore, PreferenceStore, StoreError};
