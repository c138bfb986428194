//! Protocol-level pieces of a WHOIS lookup.
//!
//! Server selection, the TCP transport and referral detection.

/// WHOIS wire protocol over TCP
pub mod whois;

/// Suffix to server mappings
pub mod registry;

/// Registrar referral detection
pub mod referral;

pub use referral::{extract_referral, should_follow};
pub use registry::{known_servers, resolve_server, select_server, IANA_WHOIS_SERVER};
pub use whois::{query_whois, TcpTransport, Transport};
