//! Suffix to WHOIS server mappings.
//!
//! The table maps public suffixes to the registry's authoritative WHOIS
//! server. Lookups walk the domain's proper suffixes from longest to
//! shortest, so `example.co.uk` hits `co.uk` before `uk`. Anything the
//! table does not know goes to the IANA root server, which answers for
//! every TLD.

use std::collections::HashMap;

use crate::utils::normalize_server;

/// Bootstrap server for suffixes missing from the table.
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org:43";

/// Built-in suffix table. Suffixes carry no leading dot.
pub const WHOIS_SERVERS: &[(&str, &str)] = &[
    // Generic TLDs
    ("com", "whois.verisign-grs.com:43"),
    ("net", "whois.verisign-grs.com:43"),
    ("org", "whois.pir.org:43"),
    ("info", "whois.afilias.net:43"),
    ("biz", "whois.neulevel.biz:43"),
    ("dev", "whois.nic.google:43"),
    ("app", "whois.nic.google:43"),
    ("xyz", "whois.nic.xyz:43"),
    ("top", "whois.nic.top:43"),
    ("moe", "whois.nic.moe:43"),
    // Country code TLDs
    ("jp", "whois.jprs.jp:43"),
    ("us", "whois.nic.us:43"),
    ("co", "whois.nic.co:43"),
    ("io", "whois.nic.io:43"),
    ("me", "whois.nic.me:43"),
    ("su", "whois.tcinet.ru:43"),
    ("uk", "whois.nic.uk:43"),
    ("co.uk", "whois.nic.uk:43"),
    ("org.uk", "whois.nic.uk:43"),
    ("de", "whois.denic.de:43"),
    ("fr", "whois.afnic.fr:43"),
    ("nl", "whois.domain-registry.nl:43"),
];

lazy_static::lazy_static! {
    static ref SERVER_MAP: HashMap<&'static str, &'static str> =
        WHOIS_SERVERS.iter().copied().collect();
}

/// Resolve the default WHOIS server for a domain.
///
/// Only proper suffixes are considered: a bare TLD such as `jp` is sent to
/// IANA, which is where TLD-level information lives.
///
/// # Examples
///
/// ```rust
/// use whois_cli_lib::resolve_server;
///
/// assert_eq!(resolve_server("EXAMPLE.COM"), "whois.verisign-grs.com:43");
/// assert_eq!(resolve_server("example.invalid"), "whois.iana.org:43");
/// ```
pub fn resolve_server(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('.').to_lowercase();

    let mut rest = domain.as_str();
    while let Some((_, suffix)) = rest.split_once('.') {
        if let Some(server) = SERVER_MAP.get(suffix) {
            return (*server).to_string();
        }
        rest = suffix;
    }

    IANA_WHOIS_SERVER.to_string()
}

/// Pick the server for a query: an explicit override always wins.
pub fn select_server(domain: &str, server_override: Option<&str>) -> String {
    match server_override.map(str::trim).filter(|s| !s.is_empty()) {
        Some(server) => normalize_server(server),
        None => resolve_server(domain),
    }
}

/// All built-in mappings, sorted by suffix.
pub fn known_servers() -> Vec<(&'static str, &'static str)> {
    let mut servers: Vec<_> = WHOIS_SERVERS.to_vec();
    servers.sort_by(|a, b| a.0.cmp(b.0));
    servers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_suffixes() {
        assert_eq!(resolve_server("example.com"), "whois.verisign-grs.com:43");
        assert_eq!(resolve_server("example.net"), "whois.verisign-grs.com:43");
        assert_eq!(resolve_server("example.org"), "whois.pir.org:43");
        assert_eq!(resolve_server("example.jp"), "whois.jprs.jp:43");
        assert_eq!(resolve_server("example.su"), "whois.tcinet.ru:43");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve_server("EXAMPLE.COM"), "whois.verisign-grs.com:43");
        assert_eq!(resolve_server("Example.JP"), "whois.jprs.jp:43");
    }

    #[test]
    fn test_longest_suffix_wins() {
        assert_eq!(resolve_server("example.co.uk"), "whois.nic.uk:43");
        assert_eq!(resolve_server("example.co"), "whois.nic.co:43");
        // Deeper labels still resolve through their registry suffix
        assert_eq!(resolve_server("www.example.co.jp"), "whois.jprs.jp:43");
    }

    #[test]
    fn test_unknown_falls_back_to_iana() {
        assert_eq!(resolve_server("example.museum"), IANA_WHOIS_SERVER);
        assert_eq!(resolve_server("localhost"), IANA_WHOIS_SERVER);
        assert_eq!(resolve_server(""), IANA_WHOIS_SERVER);
    }

    #[test]
    fn test_bare_tld_goes_to_iana() {
        assert_eq!(resolve_server("jp"), IANA_WHOIS_SERVER);
        assert_eq!(resolve_server("com"), IANA_WHOIS_SERVER);
    }

    #[test]
    fn test_suffix_must_match_whole_label() {
        // "notcom" is not ".com"
        assert_eq!(resolve_server("example.notcom"), IANA_WHOIS_SERVER);
    }

    #[test]
    fn test_trailing_dot_is_ignored() {
        assert_eq!(resolve_server("example.org."), "whois.pir.org:43");
    }

    #[test]
    fn test_override_takes_precedence() {
        assert_eq!(
            select_server("example.com", Some("whois.markmonitor.com")),
            "whois.markmonitor.com:43"
        );
        assert_eq!(
            select_server("example.com", Some("127.0.0.1:4343")),
            "127.0.0.1:4343"
        );
        assert_eq!(
            select_server("example.com", Some("  ")),
            "whois.verisign-grs.com:43"
        );
        assert_eq!(select_server("example.com", None), "whois.verisign-grs.com:43");
    }

    #[test]
    fn test_all_servers_carry_a_port() {
        for (suffix, server) in WHOIS_SERVERS {
            assert!(!suffix.starts_with('.'), "suffix {} has a leading dot", suffix);
            assert!(server.ends_with(":43"), "server {} lacks a port", server);
        }
    }

    #[test]
    fn test_known_servers_sorted() {
        let servers = known_servers();
        assert_eq!(servers.len(), WHOIS_SERVERS.len());
        assert!(servers.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
