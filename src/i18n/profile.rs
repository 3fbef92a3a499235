//! Sovereign profile registry.
//!
//! A sovereign profile is the brand bundle of one government or institution:
//! color tokens, legal text, footer links and the locales it permits. Like
//! the locale registry, profiles are defined once and never mutated; the host
//! application selects one at runtime.

use crate::i18n::Locale;
use serde::Serialize;
use std::sync::OnceLock;

/// Id of the profile selected when nothing else is configured.
pub const DEFAULT_PROFILE_ID: &str = "canada_gc";

/// Color tokens for one visual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorTokens {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

/// A link rendered in the profile footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    /// Translation catalog key for the link label (e.g., "footer.privacy")
    pub label: &'static str,
    pub url: &'static str,
}

/// One government/institution brand.
#[derive(Debug, Clone)]
pub struct SovereignProfile {
    /// Unique profile id (e.g., "canada_gc")
    pub id: &'static str,

    /// Display name (e.g., "Government of Canada")
    pub name: &'static str,

    /// Flag glyph
    pub flag: &'static str,

    /// Light mode colors
    pub colors: ColorTokens,

    /// Dark mode colors
    pub dark_colors: ColorTokens,

    /// Legal/copyright text
    pub legal_text: &'static str,

    /// Footer links, in display order
    pub footer_links: &'static [FooterLink],

    /// Locale selected when nothing else applies; always in `available_locales`
    pub default_locale: Locale,

    /// Locales this profile permits, in switcher order
    pub available_locales: &'static [Locale],
}

impl SovereignProfile {
    /// Check if a locale is permitted by this profile.
    pub fn supports(&self, locale: Locale) -> bool {
        self.available_locales.contains(&locale)
    }

    /// Find this profile's locale for a language subtag.
    pub fn locale_for_language(&self, language: &str) -> Option<Locale> {
        self.available_locales
            .iter()
            .copied()
            .find(|locale| locale.language() == language)
    }

    /// Resolve the theme for a visual mode.
    pub fn theme(&self, dark_mode: bool) -> Theme {
        Theme {
            profile: self.id,
            dark_mode,
            colors: if dark_mode {
                self.dark_colors
            } else {
                self.colors
            },
            flag: self.flag,
            legal_text: self.legal_text,
        }
    }
}

/// The resolved visual theme handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub profile: &'static str,
    pub dark_mode: bool,
    pub colors: ColorTokens,
    pub flag: &'static str,
    pub legal_text: &'static str,
}

/// Global profile registry singleton.
pub struct ProfileRegistry {
    profiles: Vec<SovereignProfile>,
}

static REGISTRY: OnceLock<ProfileRegistry> = OnceLock::new();

impl ProfileRegistry {
    /// Get the global profile registry instance.
    pub fn get() -> &'static ProfileRegistry {
        REGISTRY.get_or_init(|| ProfileRegistry {
            profiles: default_profiles(),
        })
    }

    /// Get a profile by id.
    pub fn get_by_id(&self, id: &str) -> Option<&SovereignProfile> {
        self.profiles.iter().find(|profile| profile.id == id)
    }

    /// Get all profiles.
    pub fn list_all(&self) -> Vec<&SovereignProfile> {
        self.profiles.iter().collect()
    }

    /// Get the default profile (`canada_gc`).
    ///
    /// # Panics
    /// Panics if the default profile is missing from the table, which is a
    /// configuration error in `default_profiles`.
    pub fn default_profile(&self) -> &SovereignProfile {
        self.get_by_id(DEFAULT_PROFILE_ID)
            .expect("Default profile should always be registered")
    }
}

fn default_profiles() -> Vec<SovereignProfile> {
    vec![
        SovereignProfile {
            id: "canada_gc",
            name: "Government of Canada",
            flag: "🇨🇦",
            colors: ColorTokens {
                primary: "#26374a",
                secondary: "#335075",
                accent: "#af3c43",
                background: "#ffffff",
                text: "#333333",
            },
            dark_colors: ColorTokens {
                primary: "#7ea6d8",
                secondary: "#4f6f94",
                accent: "#e06b72",
                background: "#1a1f26",
                text: "#f2f2f2",
            },
            legal_text: "© His Majesty the King in Right of Canada",
            footer_links: &[
                FooterLink {
                    label: "footer.privacy",
                    url: "https://www.canada.ca/en/transparency/privacy.html",
                },
                FooterLink {
                    label: "footer.terms",
                    url: "https://www.canada.ca/en/transparency/terms.html",
                },
                FooterLink {
                    label: "footer.accessibility",
                    url: "https://www.canada.ca/en/accessibility.html",
                },
            ],
            default_locale: Locale::EN_CA,
            available_locales: &[Locale::EN_CA, Locale::FR_CA],
        },
        SovereignProfile {
            id: "usa_gov",
            name: "USA.gov",
            flag: "🇺🇸",
            colors: ColorTokens {
                primary: "#1a4480",
                secondary: "#162e51",
                accent: "#d83933",
                background: "#ffffff",
                text: "#1b1b1b",
            },
            dark_colors: ColorTokens {
                primary: "#73b3e7",
                secondary: "#2c4a78",
                accent: "#f2938c",
                background: "#171716",
                text: "#f0f0f0",
            },
            legal_text: "An official website of the United States government",
            footer_links: &[
                FooterLink {
                    label: "footer.privacy",
                    url: "https://www.usa.gov/privacy",
                },
                FooterLink {
                    label: "footer.accessibility",
                    url: "https://www.usa.gov/accessibility",
                },
                FooterLink {
                    label: "footer.contact",
                    url: "https://www.usa.gov/contact",
                },
            ],
            default_locale: Locale::EN_US,
            available_locales: &[Locale::EN_US, Locale::ES_US],
        },
        SovereignProfile {
            id: "uk_gov",
            name: "GOV.UK",
            flag: "🇬🇧",
            colors: ColorTokens {
                primary: "#1d70b8",
                secondary: "#0b0c0c",
                accent: "#ffdd00",
                background: "#ffffff",
                text: "#0b0c0c",
            },
            dark_colors: ColorTokens {
                primary: "#5694ca",
                secondary: "#f3f2f1",
                accent: "#ffdd00",
                background: "#0b0c0c",
                text: "#f3f2f1",
            },
            legal_text: "© Crown copyright",
            footer_links: &[
                FooterLink {
                    label: "footer.privacy",
                    url: "https://www.gov.uk/help/privacy-notice",
                },
                FooterLink {
                    label: "footer.accessibility",
                    url: "https://www.gov.uk/help/accessibility-statement",
                },
                FooterLink {
                    label: "footer.terms",
                    url: "https://www.gov.uk/help/terms-conditions",
                },
            ],
            default_locale: Locale::EN_GB,
            available_locales: &[Locale::EN_GB, Locale::CY_GB],
        },
        SovereignProfile {
            id: "nz_gov",
            name: "New Zealand Government",
            flag: "🇳🇿",
            colors: ColorTokens {
                primary: "#00247d",
                secondary: "#012169",
                accent: "#cc142b",
                background: "#ffffff",
                text: "#2a2a2a",
            },
            dark_colors: ColorTokens {
                primary: "#6f8fd8",
                secondary: "#3a4f8c",
                accent: "#ef5a6c",
                background: "#121826",
                text: "#ececec",
            },
            legal_text: "© Crown Copyright, New Zealand Government",
            footer_links: &[
                FooterLink {
                    label: "footer.privacy",
                    url: "https://www.govt.nz/about/about-this-site/privacy/",
                },
                FooterLink {
                    label: "footer.contact",
                    url: "https://www.govt.nz/about/contact-us/",
                },
            ],
            default_locale: Locale::EN_NZ,
            available_locales: &[Locale::EN_NZ, Locale::MI_NZ],
        },
    ]
}
