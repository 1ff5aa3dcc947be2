//! Sanitization of Asana free-text notes for chat display.

use std::sync::OnceLock;

use regex::Regex;

/// Asana embeds uploaded-attachment links in notes; they are opaque asset
/// URLs with no meaning outside the Asana UI.
const ASSET_LINK_PATTERN: &str =
    r"https://app\.asana\.com/app/asana/-/get_asset\?asset_id=[^\s]+";

// Patterns are compile-time literals, so construction cannot fail.
#[allow(clippy::unwrap_used)]
fn asset_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ASSET_LINK_PATTERN).unwrap())
}

#[allow(clippy::unwrap_used)]
fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Normalize a notes string for single-line chat display.
///
/// Removes Asana asset links, maps non-breaking spaces to regular spaces,
/// collapses runs of whitespace (including newlines) to one space, and trims.
/// Total over all inputs and idempotent.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let without_assets = asset_link_re().replace_all(text, "");
    let normalized = without_assets.replace('\u{a0}', " ");
    let collapsed = whitespace_re().replace_all(&normalized, " ");
    collapsed.trim().to_owned()
}
