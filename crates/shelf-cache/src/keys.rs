//! Key builders for edge cache entries.
//!
//! Centralising key construction keeps the in-memory cache and the purge
//! service agreeing on what identifies a page and a purge.

use chrono::{DateTime, SecondsFormat, Utc};

/// Prefix applied to all Shelf cache keys.
const PREFIX: &str = "shelf";

/// Cache key for a rendered page.
pub fn page(url: &str) -> String {
    format!("{PREFIX}:page:{url}")
}

/// Cache key for a redirect from `url`.
pub fn redirect(url: &str) -> String {
    format!("{PREFIX}:redirect:{url}")
}

/// Identity of a purge. Two purges with the same id are duplicates.
pub fn purge_id(modified: Option<DateTime<Utc>>, edit_email: Option<&str>) -> String {
    let modified = modified
        .map(|m| m.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default();
    format!("{modified}-{}", edit_email.unwrap_or_default())
}
