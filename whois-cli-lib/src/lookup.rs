//! Lookup orchestration.
//!
//! A lookup is at most two sequential round-trips: the registry server
//! chosen for the domain, then optionally the registrar server it refers
//! to. The referral hop is best-effort; if it fails the registry answer is
//! kept.

use tracing::{debug, warn};

use crate::error::WhoisError;
use crate::protocols::{extract_referral, select_server, should_follow, TcpTransport, Transport};
use crate::types::{LookupConfig, LookupResult, Query};
use crate::utils::{normalize_domain, validate_domain};

/// WHOIS client that resolves a server, queries it and follows one referral.
///
/// # Example
///
/// ```rust,no_run
/// use whois_cli_lib::{LookupConfig, WhoisClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = WhoisClient::with_config(LookupConfig::default());
///     let result = client.lookup("example.com").await?;
///     println!("{}", result.raw);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WhoisClient<T: Transport = TcpTransport> {
    config: LookupConfig,
    transport: T,
}

impl WhoisClient<TcpTransport> {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self::with_config(LookupConfig::default())
    }

    /// Create a client with custom settings.
    pub fn with_config(config: LookupConfig) -> Self {
        Self {
            config,
            transport: TcpTransport,
        }
    }
}

impl Default for WhoisClient<TcpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> WhoisClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(config: LookupConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Look up a domain.
    ///
    /// The process:
    /// 1. Normalizes the domain (IDN to ASCII, lowercase)
    /// 2. Picks the server: the configured override, else the suffix table
    /// 3. Queries it; a failure here is returned to the caller
    /// 4. If referral following is on and the response names a different
    ///    server, queries that one too and keeps its answer when it is
    ///    non-empty
    ///
    /// # Errors
    ///
    /// Returns `WhoisError` if the domain is empty or the first query fails.
    pub async fn lookup(&self, domain: &str) -> Result<LookupResult, WhoisError> {
        validate_domain(domain)?;

        let domain = normalize_domain(domain);
        let server = select_server(&domain, self.config.server_override.as_deref());
        let query = Query::new(&domain, &server, self.config.timeout);
        debug!("selected {} for {}", query.server, query.domain);

        let raw = self
            .transport
            .query(&query.server, &query.domain, query.timeout)
            .await?;

        let mut result = LookupResult {
            domain: query.domain.clone(),
            server: query.server.clone(),
            referral: None,
            raw,
        };

        if !self.config.follow_referral {
            return Ok(result);
        }

        let Some(referral) = extract_referral(&result.raw) else {
            return Ok(result);
        };

        if !should_follow(&referral, &query.server) {
            debug!("referral {} points back at {}, not following", referral, query.server);
            return Ok(result);
        }

        debug!("following referral to {}", referral);
        match self
            .transport
            .query(&referral, &query.domain, query.timeout)
            .await
        {
            Ok(raw) if !raw.trim().is_empty() => {
                result.referral = Some(referral);
                result.raw = raw;
            }
            Ok(_) => {
                warn!("referral server {} returned an empty response", referral);
            }
            Err(e) => {
                warn!("referral query abandoned: {}", e);
            }
        }

        Ok(result)
    }
}
