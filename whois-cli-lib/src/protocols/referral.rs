//! Registrar referral detection.
//!
//! Thin registries (`.com`, `.net`) only hold a pointer to the registrar's
//! own WHOIS server, which has the full record. This module finds that
//! pointer and decides whether it is worth a second query.

use crate::utils::same_server;

/// Lowercased line prefixes that name a downstream WHOIS server.
///
/// Matching is case-insensitive, so `Whois Server:` and `WHOIS Server:` are
/// the same entry.
pub const REFERRAL_PREFIXES: &[&str] = &["registrar whois server:", "whois server:"];

/// Find the first usable referral server in a raw response.
///
/// Lines are scanned in order and the first acceptable value wins. Values
/// that are empty, URLs rather than bare hosts, the literal `none`, or
/// contain `not available` are skipped.
///
/// ```text
/// Registrar WHOIS Server: whois.markmonitor.com
/// ```
pub fn extract_referral(raw: &str) -> Option<String> {
    for line in raw.lines() {
        let line = line.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        if !REFERRAL_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
        {
            continue;
        }

        let Some((_, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        if is_usable_referral(value) {
            return Some(value.to_string());
        }
    }

    None
}

fn is_usable_referral(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    let lower = value.to_lowercase();
    !(lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower == "none"
        || lower.contains("not available"))
}

/// Whether a referral should be queried after asking `queried`.
///
/// A referral back to the server that was already asked (ignoring case and
/// the default port) would only repeat the same answer.
pub fn should_follow(referral: &str, queried: &str) -> bool {
    !referral.trim().is_empty() && !same_server(referral, queried)
}
