//! Structured field extraction from raw WHOIS text.
//!
//! Two line dialects are recognized, tried in this order:
//!
//! - **Bracketed** (JPRS): `[Key] Value`. An empty value takes the next
//!   line as its continuation, unless that line opens a new bracket.
//!   Bracket syntax is a strong enough signal that these keys are not
//!   filtered.
//! - **Colon-delimited** (Verisign, ARIN and most others): `Key: Value`,
//!   split on the first colon. Keys must pass the allow-list in
//!   [`crate::labels`].
//!
//! Output is ordered by first occurrence and never repeats a
//! (label, value) pair.

use regex::Regex;
use std::collections::HashSet;

use crate::labels::{canonical_jprs_key, is_accepted_key, translate_label};
use crate::types::{Field, FieldList, Language};

lazy_static::lazy_static! {
    /// `[Key] rest`, key ending at the first closing bracket.
    static ref BRACKETED_LINE: Regex = Regex::new(r"^\[([^\]]*)\](.*)$").unwrap();
}

/// Cursor over the cleaned lines of a response.
///
/// Lines are stripped of a trailing `\r` and surrounding whitespace up
/// front. The cursor only moves forward; [`LineCursor::peek`] and
/// [`LineCursor::consume`] are the whole of the lookahead machinery.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').trim())
            .collect();
        Self { lines, pos: 0 }
    }

    /// Take the current line and advance.
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }

    /// Look at the line after the last one taken, without moving.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Skip the peeked line.
    pub fn consume(&mut self) {
        if self.pos < self.lines.len() {
            self.pos += 1;
        }
    }

    /// Take the next line as a continuation value if it qualifies.
    ///
    /// A continuation is non-empty and does not open a new bracketed key.
    pub fn take_continuation(&mut self) -> Option<&'a str> {
        let next = self.peek()?;
        if next.is_empty() || next.starts_with('[') {
            return None;
        }
        self.consume();
        Some(next)
    }
}

/// Parse a `[Key] Value` line into its trimmed key and value.
pub fn parse_bracketed(line: &str) -> Option<(&str, &str)> {
    let caps = BRACKETED_LINE.captures(line)?;
    let key = caps.get(1).map_or("", |m| m.as_str()).trim();
    let value = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some((key, value))
}

/// Parse a `Key: Value` line, splitting on the first colon.
///
/// Returns `None` for lines without a colon, with an empty key or value, or
/// whose key opens with a `%` or `#` comment marker. The allow-list is not
/// applied here.
pub fn parse_colon_delimited(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() || key.starts_with('%') || key.starts_with('#') {
        return None;
    }

    Some((key, value))
}

/// Order-preserving collector that drops repeated (label, value) pairs.
#[derive(Debug, Default)]
struct FieldCollector {
    fields: FieldList,
    seen: HashSet<(String, String)>,
}

impl FieldCollector {
    fn push(&mut self, label: &str, value: &str) {
        if self.seen.insert((label.to_string(), value.to_string())) {
            self.fields.push(Field::new(label, value));
        }
    }
}

/// Extract the ordered, deduplicated field list from a raw response.
///
/// Labels are translated to `language` before deduplication, so two source
/// keys that display the same are collapsed when their values match. An
/// empty result means the response has no recognizable structure and
/// should be shown as-is.
///
/// # Examples
///
/// ```rust
/// use whois_cli_lib::{extract_fields, Language};
///
/// let raw = "Domain Name: EXAMPLE.COM\r\nUpdated Date: 2024-08-14T07:01:34Z\r\n";
/// let fields = extract_fields(raw, Language::English);
/// assert_eq!(fields[1].value, "2024-08-14T07:01:34Z");
/// ```
pub fn extract_fields(raw: &str, language: Language) -> FieldList {
    let mut cursor = LineCursor::new(raw);
    let mut collector = FieldCollector::default();

    while let Some(line) = cursor.next_line() {
        if line.is_empty() {
            continue;
        }

        if let Some((key, value)) = parse_bracketed(line) {
            let value = if value.is_empty() {
                cursor.take_continuation().unwrap_or("")
            } else {
                value
            };

            if !value.is_empty() {
                let label = translate_label(canonical_jprs_key(key), language);
                collector.push(label, value);
            }
            continue;
        }

        if let Some((key, value)) = parse_colon_delimited(line) {
            if is_accepted_key(key) {
                collector.push(translate_label(key, language), value);
            }
        }
    }

    collector.fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(fields: &[Field]) -> Vec<(&str, &str)> {
        fields
            .iter()
            .map(|f| (f.label.as_str(), f.value.as_str()))
            .collect()
    }

    #[test]
    fn test_cursor_peek_and_consume() {
        let mut cursor = LineCursor::new("a\r\n  b  \n\nc");
        assert_eq!(cursor.next_line(), Some("a"));
        assert_eq!(cursor.peek(), Some("b"));
        cursor.consume();
        assert_eq!(cursor.next_line(), Some(""));
        assert_eq!(cursor.next_line(), Some("c"));
        assert_eq!(cursor.peek(), None);
        cursor.consume();
        assert_eq!(cursor.next_line(), None);
    }

    #[test]
    fn test_continuation_rules() {
        let mut cursor = LineCursor::new("[Domain Name]\nexample.jp");
        cursor.next_line();
        assert_eq!(cursor.take_continuation(), Some("example.jp"));
        assert_eq!(cursor.next_line(), None);

        let mut cursor = LineCursor::new("[Domain Name]\n[Status] Active");
        cursor.next_line();
        assert_eq!(cursor.take_continuation(), None);
        assert_eq!(cursor.next_line(), Some("[Status] Active"));

        let mut cursor = LineCursor::new("[Domain Name]\n\nexample.jp");
        cursor.next_line();
        assert_eq!(cursor.take_continuation(), None);
        assert_eq!(cursor.next_line(), Some(""));
    }

    #[test]
    fn test_parse_bracketed() {
        assert_eq!(
            parse_bracketed("[Domain Name]   EXAMPLE.JP"),
            Some(("Domain Name", "EXAMPLE.JP"))
        );
        assert_eq!(parse_bracketed("[Status]"), Some(("Status", "")));
        assert_eq!(
            parse_bracketed("[Name] [bracketed] value"),
            Some(("Name", "[bracketed] value"))
        );
        assert_eq!(parse_bracketed("Domain Name: x"), None);
        assert_eq!(parse_bracketed("[no closing bracket"), None);
    }

    #[test]
    fn test_parse_colon_delimited() {
        assert_eq!(
            parse_colon_delimited("Registrar: Example Inc."),
            Some(("Registrar", "Example Inc."))
        );
        assert_eq!(parse_colon_delimited("Registrar:"), None);
        assert_eq!(parse_colon_delimited(": value"), None);
        assert_eq!(parse_colon_delimited("% Domain: comment"), None);
        assert_eq!(parse_colon_delimited("# whois: comment"), None);
        assert_eq!(parse_colon_delimited("no colon here"), None);
    }

    #[test]
    fn test_value_keeps_colons() {
        let raw = "Creation Date: 2024-01-01T00:00:00Z\nName Server: 2001:db8::53\n";
        let fields = extract_fields(raw, Language::English);
        assert_eq!(
            pairs(&fields),
            vec![
                ("Creation Date", "2024-01-01T00:00:00Z"),
                ("Name Server", "2001:db8::53"),
            ]
        );
    }

    #[test]
    fn test_verisign_response() {
        let raw = "   Domain Name: EXAMPLE.COM\r\n\
                   \x20  Registry Domain ID: 2336799_DOMAIN_COM-VRSN\r\n\
                   \x20  Registrar WHOIS Server: whois.iana.org\r\n\
                   \x20  Registrar URL: http://res-dom.iana.org\r\n\
                   \x20  Creation Date: 1995-08-14T04:00:00Z\r\n\
                   \x20  Registrar: RESERVED-Internet Assigned Numbers Authority\r\n\
                   \x20  Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited\r\n\
                   \x20  Name Server: A.IANA-SERVERS.NET\r\n\
                   \x20  Name Server: B.IANA-SERVERS.NET\r\n\
                   \x20  DNSSEC: signedDelegation\r\n\
                   >>> Last update of whois database: 2024-10-19T07:20:00Z <<<\r\n\
                   \r\n\
                   NOTICE: The expiration date displayed in this record is the date the\r\n\
                   TERMS OF USE: You are not authorized to access or query our Whois\r\n";

        let fields = extract_fields(raw, Language::English);
        let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "Domain Name",
                "Registry Domain ID",
                "Registrar WHOIS Server",
                "Registrar URL",
                "Creation Date",
                "Registrar",
                "Domain Status",
                "Name Server",
                "Name Server",
                ">>> Last update of whois database",
            ]
        );
        assert_eq!(fields[3].value, "http://res-dom.iana.org");
        assert_eq!(fields[8].value, "B.IANA-SERVERS.NET");
    }

    #[test]
    fn test_jprs_response() {
        let raw = "[ JPRS database provides information on network administration. ]\n\
                   \n\
                   [ドメイン名]                    EXAMPLE.JP\n\
                   [登録者名]\n\
                   Example Corporation\n\
                   [状態]                          Active\n\
                   [最終更新]                      2024/04/01 01:05:03 (JST)\n\
                   [公開連絡窓口]\n\
                   [名前]                          Example Taro\n";

        let fields = extract_fields(raw, Language::English);
        assert_eq!(
            pairs(&fields),
            vec![
                ("Domain Name", "EXAMPLE.JP"),
                ("Registrant", "Example Corporation"),
                ("Status", "Active"),
                ("Updated Date", "2024/04/01 01:05:03 (JST)"),
                ("Name", "Example Taro"),
            ]
        );
    }

    #[test]
    fn test_bracketed_continuation() {
        let fields = extract_fields("[Domain Name]\nexample.jp\n", Language::English);
        assert_eq!(pairs(&fields), vec![("Domain Name", "example.jp")]);
    }

    #[test]
    fn test_bracketed_keys_skip_allow_list() {
        let fields = extract_fields("[Signing Key]   ABCDEF\n", Language::English);
        assert_eq!(pairs(&fields), vec![("Signing Key", "ABCDEF")]);
    }

    #[test]
    fn test_bracketed_line_is_never_colon_parsed() {
        let fields = extract_fields("[Note] Domain: example.jp\n", Language::English);
        assert_eq!(pairs(&fields), vec![("Note", "Domain: example.jp")]);
    }

    #[test]
    fn test_allow_list_rejection() {
        let raw = "NOTE: This record is provided for information purposes\n";
        assert!(extract_fields(raw, Language::English).is_empty());
    }

    #[test]
    fn test_comment_rejection() {
        let raw = "% This is a comment\n% Domain: example.com\n# Registrar: nobody\n";
        assert!(extract_fields(raw, Language::English).is_empty());
    }

    #[test]
    fn test_known_label_is_translated() {
        let fields = extract_fields("Registrar IANA ID: 292\n", Language::Japanese);
        assert_eq!(pairs(&fields), vec![("IANA ID", "292")]);
    }

    #[test]
    fn test_exact_label_match_is_case_sensitive() {
        // "creation" matches no pattern, so only the exact label gets in.
        let raw = "Creation Date: 2020-01-01\ncreation date: 2020-01-01\n";
        let fields = extract_fields(raw, Language::English);
        assert_eq!(pairs(&fields), vec![("Creation Date", "2020-01-01")]);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let raw = "Name Server: NS1.EXAMPLE.COM\n\
                   Name Server: NS2.EXAMPLE.COM\n\
                   Name Server: NS1.EXAMPLE.COM\n\
                   name server: NS1.EXAMPLE.COM\n";
        let fields = extract_fields(raw, Language::English);
        assert_eq!(
            pairs(&fields),
            vec![
                ("Name Server", "NS1.EXAMPLE.COM"),
                ("Name Server", "NS2.EXAMPLE.COM"),
                ("name server", "NS1.EXAMPLE.COM"),
            ]
        );
    }

    #[test]
    fn test_translated_collision_is_deduplicated() {
        // The JPRS key and the colon key both display as 登録日.
        let raw = "[登録年月日] 2001/02/03\nCreation Date: 2001/02/03\n";
        let fields = extract_fields(raw, Language::Japanese);
        assert_eq!(pairs(&fields), vec![("登録日", "2001/02/03")]);

        let fields = extract_fields(raw, Language::English);
        assert_eq!(pairs(&fields), vec![("Creation Date", "2001/02/03")]);
    }

    #[test]
    fn test_values_are_not_translated() {
        let fields = extract_fields("Registrar: Registrar\n", Language::Japanese);
        assert_eq!(pairs(&fields), vec![("レジストラ", "Registrar")]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let raw = "Domain Name: EXAMPLE.COM\n[状態] Active\nRegistrar: X\nRegistrar: X\n";
        assert_eq!(
            extract_fields(raw, Language::Japanese),
            extract_fields(raw, Language::Japanese)
        );
    }

    #[test]
    fn test_no_structure_yields_empty_list() {
        assert!(extract_fields("", Language::English).is_empty());
        assert!(extract_fields("\r\n\r\n", Language::English).is_empty());
        assert!(extract_fields("No match for \"EXAMPLE.TEST\".\n", Language::English).is_empty());
    }
}
