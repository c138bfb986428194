//! Utility functions for domain and server normalization.

use crate::error::WhoisError;
use std::time::Duration;

/// The well-known WHOIS port.
pub const DEFAULT_PORT: u16 = 43;

/// Normalize a user-supplied domain for the wire.
///
/// Surrounding whitespace is trimmed, internationalized names are converted
/// to their ASCII-compatible (punycode) form and the result is lowercased.
/// If IDN conversion fails the trimmed input is used as-is, so the server
/// gets to decide what to do with it.
pub fn normalize_domain(input: &str) -> String {
    let trimmed = input.trim();

    match idna::domain_to_ascii(trimmed) {
        Ok(ascii) if !ascii.is_empty() => ascii.to_lowercase(),
        _ => trimmed.to_lowercase(),
    }
}

/// Append the default WHOIS port to a server address that has none.
///
/// Any address already containing `:` is taken to carry a port.
pub fn normalize_server(server: &str) -> String {
    let server = server.trim();
    if server.is_empty() || server.contains(':') {
        return server.to_string();
    }
    format!("{}:{}", server, DEFAULT_PORT)
}

/// Compare two server addresses after port normalization, ignoring case.
pub fn same_server(a: &str, b: &str) -> bool {
    normalize_server(a).eq_ignore_ascii_case(&normalize_server(b))
}

/// Basic sanity check before a domain goes to the network.
pub fn validate_domain(domain: &str) -> Result<(), WhoisError> {
    let domain = domain.trim();

    if domain.is_empty() {
        return Err(WhoisError::invalid_domain(
            domain,
            "Domain name cannot be empty",
        ));
    }

    if domain.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(WhoisError::invalid_domain(
            domain,
            "Domain name cannot contain whitespace or control characters",
        ));
    }

    Ok(())
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration like "500ms", "8s", "1.5m", "1h" or "1m30s".
///
/// A bare number (whole or fractional) is seconds. Otherwise the input is
/// one or more number+unit components with units `ms`, `s`, `m` and `h`.
/// Zero, negative, malformed and out-of-range values return `None`.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let total = if input.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        component_nanos(&input, NANOS_PER_SEC)?
    } else {
        let mut total: u128 = 0;
        let mut rest = input.as_str();
        while !rest.is_empty() {
            let number_end = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(rest.len());
            let (number, tail) = rest.split_at(number_end);
            let unit_end = tail
                .find(|c: char| c.is_ascii_digit() || c == '.')
                .unwrap_or(tail.len());
            let (unit, next) = tail.split_at(unit_end);

            let unit_nanos = match unit {
                "ms" => 1_000_000,
                "s" => NANOS_PER_SEC,
                "m" => 60 * NANOS_PER_SEC,
                "h" => 3600 * NANOS_PER_SEC,
                _ => return None,
            };
            total = total.checked_add(component_nanos(number, unit_nanos)?)?;
            rest = next;
        }
        total
    };

    let secs = u64::try_from(total / NANOS_PER_SEC).ok()?;
    let nanos = (total % NANOS_PER_SEC) as u32;
    Some(Duration::new(secs, nanos)).filter(|d| !d.is_zero())
}

/// Nanoseconds in `number` units of `unit_nanos`. Fractions past 18
/// digits are ignored.
fn component_nanos(number: &str, unit_nanos: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit_nanos)?;

    if !fraction.is_empty() {
        let digits = &fraction[..fraction.len().min(18)];
        let value: u128 = digits.parse().ok()?;
        let scale = 10u128.pow(digits.len() as u32);
        nanos = nanos.checked_add(value * unit_nanos / scale)?;
    }

    Some(nanos)
}
