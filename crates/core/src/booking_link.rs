//! Tenant booking link: the public slug customers open to self-book.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

pub const MIN_SLUG_LEN: usize = 3;
pub const MAX_SLUG_LEN: usize = 60;

/// Welcome text used until the owner writes their own.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Bem-vindo ao nosso agendamento online.";

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid regex"));

/// Replace whitespace runs with `-` and lower-case the result.
pub fn normalize_slug(input: &str) -> String {
    WHITESPACE_RE
        .replace_all(input.trim(), "-")
        .to_lowercase()
}

/// Normalize `input` and check it is a usable slug.
pub fn validate_slug(input: &str) -> Result<String, CoreError> {
    let slug = normalize_slug(input);
    let len = slug.chars().count();
    if !(MIN_SLUG_LEN..=MAX_SLUG_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Booking link must be between {MIN_SLUG_LEN} and {MAX_SLUG_LEN} characters"
        )));
    }
    if !SLUG_RE.is_match(&slug) {
        return Err(CoreError::Validation(
            "Booking link may only contain lowercase letters, digits and hyphens".to_string(),
        ));
    }
    Ok(slug)
}

/// Full public address, e.g. `beautyscheduler.com/meu-salao`.
pub fn booking_url(base: &str, slug: &str) -> String {
    format!("{}/{slug}", base.trim_end_matches('/'))
}

/// Slug suggested for a fresh account, derived from the owner's name.
pub fn suggest_slug(name: &str) -> String {
    let slug: String = normalize_slug(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(MAX_SLUG_LEN)
        .collect();
    if slug.len() < MIN_SLUG_LEN {
        "meu-salao".to_string()
    } else {
        slug
    }
}
