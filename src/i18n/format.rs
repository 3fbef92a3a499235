//! Locale-aware date, number and currency formatting.
//!
//! Call sites pick a named preset (`DateStyle::Medium`, `NumberStyle::Decimal`)
//! instead of passing raw format options, so every component formats the
//! same value the same way for a given locale.

use crate::i18n::Locale;
use chrono::{Datelike, NaiveDate};

/// Named date presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Numeric (e.g., "2024-03-05", "3/5/24")
    Short,
    /// Abbreviated month (e.g., "Mar 5, 2024")
    Medium,
    /// Full month name (e.g., "March 5, 2024")
    Long,
}

/// Named number presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// No fraction digits
    Integer,
    /// Two fraction digits
    Decimal,
    /// Ratio rendered as a whole percentage (0.25 → "25%")
    Percent,
}

/// Separators and currency placement for one locale.
struct Conventions {
    group: &'static str,
    decimal: &'static str,
    currency_symbol: &'static str,
    currency_after: bool,
    short_date: &'static str,
}

const NBSP: &str = "\u{a0}";

fn conventions(locale: Locale) -> Conventions {
    match locale.tag() {
        "fr-CA" => Conventions {
            group: NBSP,
            decimal: ",",
            currency_symbol: "$",
            currency_after: true,
            short_date: "%Y-%m-%d",
        },
        "en-CA" => Conventions {
            group: ",",
            decimal: ".",
            currency_symbol: "$",
            currency_after: false,
            short_date: "%Y-%m-%d",
        },
        "en-US" => Conventions {
            group: ",",
            decimal: ".",
            currency_symbol: "$",
            currency_after: false,
            short_date: "%-m/%-d/%y",
        },
        "es-US" => Conventions {
            group: ",",
            decimal: ".",
            currency_symbol: "$",
            currency_after: false,
            short_date: "%-d/%-m/%y",
        },
        "en-GB" | "cy-GB" => Conventions {
            group: ",",
            decimal: ".",
            currency_symbol: "£",
            currency_after: false,
            short_date: "%d/%m/%Y",
        },
        _ => Conventions {
            group: ",",
            decimal: ".",
            currency_symbol: "$",
            currency_after: false,
            short_date: "%-d/%m/%y",
        },
    }
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_EN_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
const MONTHS_FR_ABBR: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];
const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];
const MONTHS_ES_ABBR: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];
const MONTHS_CY: [&str; 12] = [
    "Ionawr", "Chwefror", "Mawrth", "Ebrill", "Mai", "Mehefin", "Gorffennaf", "Awst", "Medi",
    "Hydref", "Tachwedd", "Rhagfyr",
];
const MONTHS_CY_ABBR: [&str; 12] = [
    "Ion", "Chwef", "Maw", "Ebr", "Mai", "Meh", "Gorff", "Awst", "Medi", "Hyd", "Tach", "Rhag",
];
const MONTHS_MI: [&str; 12] = [
    "Kohi-tātea",
    "Hui-tanguru",
    "Poutū-te-rangi",
    "Paenga-whāwhā",
    "Haratua",
    "Pipiri",
    "Hōngongoi",
    "Here-turi-kōkā",
    "Mahuru",
    "Whiringa-ā-nuku",
    "Whiringa-ā-rangi",
    "Hakihea",
];
const MONTHS_MI_ABBR: [&str; 12] = [
    "Kohi", "Hui", "Pou", "Pae", "Hara", "Pipi", "Hōngo", "Here", "Mahu", "Nuku", "Rangi", "Haki",
];

fn month_names(language: &str, abbreviated: bool) -> &'static [&'static str; 12] {
    match (language, abbreviated) {
        ("fr", false) => &MONTHS_FR,
        ("fr", true) => &MONTHS_FR_ABBR,
        ("es", false) => &MONTHS_ES,
        ("es", true) => &MONTHS_ES_ABBR,
        ("cy", false) => &MONTHS_CY,
        ("cy", true) => &MONTHS_CY_ABBR,
        ("mi", false) => &MONTHS_MI,
        ("mi", true) => &MONTHS_MI_ABBR,
        (_, false) => &MONTHS_EN,
        (_, true) => &MONTHS_EN_ABBR,
    }
}

/// Format a calendar date for a locale.
pub fn format_date(locale: Locale, date: NaiveDate, style: DateStyle) -> String {
    if style == DateStyle::Short {
        return date.format(conventions(locale).short_date).to_string();
    }

    let abbreviated = style == DateStyle::Medium;
    let month = month_names(locale.language(), abbreviated)[date.month0() as usize];
    let day = date.day();
    let year = date.year();

    match locale.tag() {
        // North American English puts the month first
        "en-CA" | "en-US" => format!("{} {}, {}", month, day, year),
        "es-US" if style == DateStyle::Long => format!("{} de {} de {}", day, month, year),
        _ => format!("{} {} {}", day, month, year),
    }
}

/// Format a number for a locale.
pub fn format_number(locale: Locale, value: f64, style: NumberStyle) -> String {
    let conventions = conventions(locale);
    match style {
        NumberStyle::Integer => format_fixed(value, 0, &conventions),
        NumberStyle::Decimal => format_fixed(value, 2, &conventions),
        NumberStyle::Percent => {
            let number = format_fixed(value * 100.0, 0, &conventions);
            if locale.language() == "fr" {
                format!("{}{}%", number, NBSP)
            } else {
                format!("{}%", number)
            }
        }
    }
}

/// Format a monetary amount in the locale region's currency.
pub fn format_currency(locale: Locale, amount: f64) -> String {
    let conventions = conventions(locale);
    let number = format_fixed(amount.abs(), 2, &conventions);
    let sign = if amount < 0.0 && number.chars().any(|c| matches!(c, '1'..='9')) {
        "-"
    } else {
        ""
    };

    if conventions.currency_after {
        format!("{}{}{}{}", sign, number, NBSP, conventions.currency_symbol)
    } else {
        format!("{}{}{}", sign, conventions.currency_symbol, number)
    }
}

fn format_fixed(value: f64, fraction_digits: usize, conventions: &Conventions) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = format!("{:.*}", fraction_digits, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut result = String::new();
    if value < 0.0 && rendered.chars().any(|c| matches!(c, '1'..='9')) {
        result.push('-');
    }
    result.push_str(&group_digits(integer, conventions.group));
    if let Some(fraction) = fraction {
        result.push_str(conventions.decimal);
        result.push_str(fraction);
    }
    result
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}
