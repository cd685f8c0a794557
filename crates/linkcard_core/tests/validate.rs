use linkcard_core::{validate, ValidationResult, INVALID_URL_MESSAGE};
use pretty_assertions::assert_eq;

fn valid(url: &str) -> ValidationResult {
    ValidationResult::Valid(url.to_string())
}

fn invalid() -> ValidationResult {
    ValidationResult::Invalid(INVALID_URL_MESSAGE.to_string())
}

#[test]
fn bare_domain_gets_https_scheme() {
    assert_eq!(validate("example.com"), valid("https://example.com"));
}

#[test]
fn ipv4_with_port_is_accepted() {
    assert_eq!(
        validate("192.168.1.1:8080"),
        valid("https://192.168.1.1:8080")
    );
}

#[test]
fn out_of_range_ipv4_is_rejected() {
    assert_eq!(validate("999.999.999.999"), invalid());
}

#[test]
fn free_text_is_rejected() {
    assert_eq!(validate("not a url"), invalid());
    assert_eq!(validate(""), invalid());
    assert_eq!(validate("localhost:3000"), invalid());
}

#[test]
fn compressed_ipv6_is_rejected_by_strict_pattern() {
    assert_eq!(validate("::1"), invalid());
    assert_eq!(validate("[::1]"), invalid());
    assert_eq!(validate("http://[2001:db8::1]/"), invalid());
}

#[test]
fn full_ipv6_literal_is_accepted() {
    assert!(validate("[2001:db8:1:2:3:4:5:6]:8443").is_valid());
}

#[test]
fn explicit_scheme_and_path_are_preserved() {
    assert_eq!(
        validate("http://blog.example.org/post?id=7"),
        valid("http://blog.example.org/post?id=7")
    );
    assert!(validate("HTTPS://Example.COM").is_valid());
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(validate("  example.com\n"), valid("https://example.com"));
}

#[test]
fn schemeless_input_matches_https_prefixed_input() {
    let inputs = [
        "example.com",
        "sub.example.co.uk/path",
        "192.168.1.1:8080",
        "999.999.999.999",
        "not a url",
        "localhost",
        "example.com:8080/x?y=z",
        "-bad.example.com",
        "::1",
    ];
    for input in inputs {
        assert_eq!(
            validate(input),
            validate(&format!("https://{input}")),
            "input {input:?}"
        );
    }
}

#[test]
fn revalidating_normalized_url_is_stable() {
    for input in ["example.com", "10.0.0.1:3000/a", "http://example.org"] {
        let ValidationResult::Valid(normalized) = validate(input) else {
            panic!("{input} should be valid");
        };
        assert_eq!(validate(&normalized), valid(&normalized));
    }
}
