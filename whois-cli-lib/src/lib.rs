//! # WHOIS CLI Library
//!
//! Query WHOIS servers over TCP port 43 and turn their free-form replies
//! into ordered label/value pairs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whois_cli_lib::{extract_fields, Language, WhoisClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WhoisClient::new();
//!     let result = client.lookup("example.com").await?;
//!
//!     for field in extract_fields(&result.raw, Language::English) {
//!         println!("{}: {}", field.label, field.value);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Server Selection**: Longest-suffix match with IANA fallback
//! - **Referral Following**: One hop to the registrar's own server
//! - **Field Extraction**: JPRS bracketed and `Key: Value` formats
//! - **Localized Labels**: English and Japanese display names

// Re-export main public API types and functions
pub use config::{load_env_config, ConfigManager, DefaultsConfig, EnvConfig, FileConfig, Settings};
pub use error::WhoisError;
pub use extract::{extract_fields, parse_bracketed, parse_colon_delimited, LineCursor};
pub use labels::{canonical_jprs_key, is_accepted_key, translate_label};
pub use lookup::WhoisClient;
pub use protocols::{
    extract_referral, known_servers, query_whois, resolve_server, select_server, should_follow,
    TcpTransport, Transport, IANA_WHOIS_SERVER,
};
pub use types::{
    Field, FieldList, Language, LookupConfig, LookupResult, OutputMode, Query, DEFAULT_TIMEOUT,
};
pub use utils::{normalize_domain, normalize_server, parse_duration};

// Internal modules
mod config;
mod error;
mod extract;
mod labels;
mod lookup;
mod protocols;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, WhoisError>;
