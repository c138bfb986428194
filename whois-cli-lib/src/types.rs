//! Core data types for WHOIS lookups.
//!
//! This module defines the values that flow through a lookup: the query,
//! the lookup tunables, the extracted fields and the presentation enums the
//! CLI selects between.

use std::fmt;
use std::time::Duration;

use crate::utils::{normalize_domain, normalize_server};

/// Default overall deadline for one WHOIS round-trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// A single WHOIS query: what to ask, whom to ask, and how long to wait.
///
/// Built once per invocation; the domain is already IDN-converted and
/// lowercased and the server always carries a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub domain: String,
    pub server: String,
    pub timeout: Duration,
}

impl Query {
    pub fn new(domain: &str, server: &str, timeout: Duration) -> Self {
        Self {
            domain: normalize_domain(domain),
            server: normalize_server(server),
            timeout,
        }
    }
}

/// One structured datum extracted from a WHOIS response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    /// Display label, possibly translated
    pub label: String,
    /// Raw value as the server sent it
    pub value: String,
}

impl Field {
    pub fn new<L: Into<String>, V: Into<String>>(label: L, value: V) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Fields in order of first occurrence in the source text.
pub type FieldList = Vec<Field>;

/// Result of a lookup, including the referral hop if one was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    /// Normalized domain that was queried
    pub domain: String,

    /// Server the first query went to (`host:port`)
    pub server: String,

    /// Referral server whose answer is in `raw`, if the referral succeeded
    pub referral: Option<String>,

    /// Final response text
    pub raw: String,
}

impl LookupResult {
    /// Server whose response ended up in `raw`.
    pub fn answered_by(&self) -> &str {
        self.referral.as_deref().unwrap_or(&self.server)
    }
}

/// Tunables for a lookup. Constructed at process entry and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Deadline for each individual round-trip
    /// Default: 8 seconds
    pub timeout: Duration,

    /// Server to use instead of the suffix table
    /// Default: None
    pub server_override: Option<String>,

    /// Whether to follow a registrar referral
    /// Default: true
    pub follow_referral: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            server_override: None,
            follow_referral: true,
        }
    }
}

impl LookupConfig {
    /// Set custom timeout for each round-trip.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Query this server instead of resolving one from the domain suffix.
    pub fn with_server<S: Into<String>>(mut self, server: S) -> Self {
        let server = server.into();
        self.server_override = if server.trim().is_empty() {
            None
        } else {
            Some(server.trim().to_string())
        };
        self
    }

    /// Enable or disable referral following.
    pub fn with_follow_referral(mut self, enabled: bool) -> Self {
        self.follow_referral = enabled;
        self
    }
}

/// Display language for field labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Japanese,
}

impl Language {
    /// Parse a language code; anything unrecognized is English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "ja" | "jp" | "ja-jp" | "japanese" => Language::Japanese,
            _ => Language::English,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How the final response is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Response text as received
    Raw,

    /// One `Label: Value` line per extracted field
    #[default]
    Labeled,

    /// Box-drawn table of extracted fields
    Table,
}

impl OutputMode {
    /// Parse an output mode name. `conventional` is the historic spelling of
    /// labeled output.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "raw" => Some(OutputMode::Raw),
            "labeled" | "labelled" | "conventional" => Some(OutputMode::Labeled),
            "table" => Some(OutputMode::Table),
            _ => None,
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Raw => write!(f, "raw"),
            OutputMode::Labeled => write!(f, "labeled"),
            OutputMode::Table => write!(f, "table"),
        }
    }
}
