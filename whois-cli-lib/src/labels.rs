//! Field-name tables used by extraction and display.
//!
//! Everything here is plain data plus pure lookups: the JPRS key
//! dictionary, the set of canonical labels, the substring allow-list for
//! colon-delimited keys, and per-language display translations. Adding a
//! language means adding a table and a match arm in [`translate_label`];
//! extraction never changes.

use std::collections::{HashMap, HashSet};

use crate::types::Language;

/// JPRS (`.jp`) bracketed keys and their canonical English names.
pub const JPRS_KEYS: &[(&str, &str)] = &[
    ("ドメイン名", "Domain Name"),
    ("登録者名", "Registrant"),
    ("登録年月日", "Creation Date"),
    ("有効期限", "Registry Expiry Date"),
    ("最終更新", "Updated Date"),
    ("状態", "Status"),
    ("公開連絡窓口", "Registrant Contact"),
    ("名前", "Name"),
    ("郵便番号", "Postal Code"),
    ("住所", "Postal Address"),
    ("電話番号", "Phone"),
    ("FAX番号", "Fax"),
];

/// Canonical English labels accepted verbatim in colon-delimited lines.
pub const KNOWN_LABELS: &[&str] = &[
    "Registrar",
    "Registrar WHOIS Server",
    "Registrar URL",
    "Creation Date",
    "Registry Expiry Date",
    "Name Server",
    "Registrar IANA ID",
    "Registrar Abuse Contact Email",
    "Registrar Abuse Contact Phone",
];

/// Lowercase substrings that mark a colon-delimited key as a WHOIS field.
///
/// WHOIS has no shared schema, so this favours recall: registry banners
/// and legal text rarely contain any of these tokens.
pub const KEY_PATTERNS: &[&str] = &[
    "domain",
    "registrar",
    "registrant",
    "admin",
    "tech",
    "billing",
    "created",
    "updated",
    "expires",
    "expiry",
    "status",
    "server",
    "name",
    "organization",
    "organisation",
    "email",
    "phone",
    "fax",
    "address",
    "city",
    "state",
    "country",
    "postal",
    "whois",
    "url",
    "iana",
];

/// Japanese display labels for canonical English labels.
pub const JA_LABELS: &[(&str, &str)] = &[
    ("Registrar", "レジストラ"),
    ("Registrar WHOIS Server", "レジストラWhoisサーバ"),
    ("Registrar URL", "レジストラURL"),
    ("Creation Date", "登録日"),
    ("Registry Expiry Date", "有効期限"),
    ("Name Server", "ネームサーバ"),
    ("Registrar IANA ID", "IANA ID"),
    ("Registrar Abuse Contact Email", "不正通報先メール"),
    ("Registrar Abuse Contact Phone", "不正通報先電話"),
];

lazy_static::lazy_static! {
    static ref JPRS_MAP: HashMap<&'static str, &'static str> = JPRS_KEYS.iter().copied().collect();
    static ref KNOWN_LABEL_SET: HashSet<&'static str> = KNOWN_LABELS.iter().copied().collect();
    static ref JA_MAP: HashMap<&'static str, &'static str> = JA_LABELS.iter().copied().collect();
}

/// Map a JPRS bracketed key to its canonical English name.
///
/// Unknown keys (including JPRS's own English keys) pass through unchanged.
pub fn canonical_jprs_key(key: &str) -> &str {
    JPRS_MAP.get(key).copied().unwrap_or(key)
}

/// Exact match against the canonical label set.
pub fn is_known_label(key: &str) -> bool {
    KNOWN_LABEL_SET.contains(key)
}

/// Whether a colon-delimited key looks like a WHOIS field name.
pub fn is_accepted_key(key: &str) -> bool {
    if is_known_label(key) {
        return true;
    }
    let lower = key.to_lowercase();
    KEY_PATTERNS.iter().any(|pattern| lower.contains(pattern))
}

/// Translate a label for display. Untranslated labels pass through.
pub fn translate_label(label: &str, language: Language) -> &str {
    let table: Option<&HashMap<&'static str, &'static str>> = match language {
        Language::English => None,
        Language::Japanese => Some(&*JA_MAP),
    };

    table
        .and_then(|t| t.get(label).copied())
        .unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jprs_keys_map_to_english() {
        assert_eq!(canonical_jprs_key("ドメイン名"), "Domain Name");
        assert_eq!(canonical_jprs_key("有効期限"), "Registry Expiry Date");
        assert_eq!(canonical_jprs_key("FAX番号"), "Fax");
        assert_eq!(canonical_jprs_key("Domain Name"), "Domain Name");
        assert_eq!(canonical_jprs_key("ネームサーバ"), "ネームサーバ");
    }

    #[test]
    fn test_known_labels_are_exact() {
        assert!(is_known_label("Registrar IANA ID"));
        assert!(!is_known_label("registrar iana id"));
    }

    #[test]
    fn test_pattern_allow_list() {
        assert!(is_accepted_key("Domain Name"));
        assert!(is_accepted_key("Tech Email"));
        assert!(is_accepted_key("nserver")); // contains "server"
        assert!(is_accepted_key("OrgName")); // contains "name"
        assert!(!is_accepted_key("NOTE"));
        assert!(!is_accepted_key("Terms of Use"));
        assert!(!is_accepted_key("e-mail"));
    }

    #[test]
    fn test_patterns_are_lowercase() {
        for pattern in KEY_PATTERNS {
            assert_eq!(*pattern, pattern.to_lowercase());
        }
    }

    #[test]
    fn test_every_known_label_has_a_japanese_translation() {
        for label in KNOWN_LABELS {
            assert_ne!(translate_label(label, Language::Japanese), *label);
        }
    }

    #[test]
    fn test_translate_label() {
        assert_eq!(translate_label("Registrar", Language::Japanese), "レジストラ");
        assert_eq!(translate_label("Registrar", Language::English), "Registrar");
        assert_eq!(translate_label("Domain Name", Language::Japanese), "Domain Name");
    }
}
