//! Address validation for the submission form.
//!
//! Input is normalized to carry an explicit scheme, parsed with WHATWG rules
//! and then the hostname is classified as IPv4, IPv6 or a domain name.
//!
//! IPv6 hosts are matched against a strict eight-group pattern. The parser
//! canonicalizes IPv6 hosts, so an address containing a run of two or more
//! zero groups comes back in `::` form and is rejected.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Message shown when the entered address cannot be used.
pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid web address, for example example.com or 192.168.1.1:8080";

const DEFAULT_SCHEME_PREFIX: &str = "https://";

static IPV4_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("ipv4 pattern"));
static IPV6_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$").expect("ipv6 pattern")
});
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
        .expect("domain pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Address accepted; carries the normalized form sent to the generator.
    Valid(String),
    /// Address rejected; carries the user-facing reason.
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Ipv4,
    Ipv6,
    Domain,
}

/// Validates a user-entered address.
pub fn validate(input: &str) -> ValidationResult {
    let normalized = normalize(input);
    let parsed = match Url::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(_) => return invalid(),
    };
    let Some(host) = parsed.host_str() else {
        return invalid();
    };

    match classify_host(host) {
        Some(_) => ValidationResult::Valid(normalized),
        None => invalid(),
    }
}

/// Trims the input and prepends `https://` unless an http(s) scheme is present.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    if has_web_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    }
}

/// Classifies a parsed hostname. Brackets around IPv6 literals are ignored.
pub fn classify_host(host: &str) -> Option<HostKind> {
    let host = host
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(host);

    if IPV4_PATTERN.is_match(host) {
        let in_range = host
            .split('.')
            .all(|part| part.parse::<u16>().is_ok_and(|value| value <= 255));
        return in_range.then_some(HostKind::Ipv4);
    }
    if IPV6_PATTERN.is_match(host) {
        return Some(HostKind::Ipv6);
    }
    DOMAIN_PATTERN.is_match(host).then_some(HostKind::Domain)
}

fn has_web_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

fn invalid() -> ValidationResult {
    ValidationResult::Invalid(INVALID_URL_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::{classify_host, has_web_scheme, normalize, HostKind};

    #[test]
    fn scheme_detection_ignores_case() {
        assert!(has_web_scheme("HTTP://example.com"));
        assert!(has_web_scheme("https://example.com"));
        assert!(!has_web_scheme("ftp://example.com"));
        assert!(!has_web_scheme("htt"));
    }

    #[test]
    fn normalize_trims_and_prefixes() {
        assert_eq!(normalize("  example.com \n"), "https://example.com");
        assert_eq!(normalize("http://example.com"), "http://example.com");
    }

    #[test]
    fn ipv4_groups_must_be_in_range() {
        assert_eq!(classify_host("10.0.0.255"), Some(HostKind::Ipv4));
        assert_eq!(classify_host("10.0.0.256"), None);
    }

    #[test]
    fn ipv6_requires_all_eight_groups() {
        assert_eq!(
            classify_host("[2001:db8:1:2:3:4:5:6]"),
            Some(HostKind::Ipv6)
        );
        assert_eq!(classify_host("[::1]"), None);
    }

    #[test]
    fn domain_labels_cannot_start_or_end_with_hyphen() {
        assert_eq!(classify_host("my-site.example.org"), Some(HostKind::Domain));
        assert_eq!(classify_host("-bad.example.org"), None);
        assert_eq!(classify_host("bad-.example.org"), None);
        assert_eq!(classify_host("localhost"), None);
        assert_eq!(classify_host("example.c"), None);
    }
}
