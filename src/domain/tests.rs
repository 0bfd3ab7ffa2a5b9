// Domain module tests.

use super::*;

#[test]
fn test_parse_plain_domain() {
    assert_eq!(DomainName::parse("example.com").unwrap().as_str(), "example.com");
}

#[test]
fn test_parse_strips_https_scheme_and_www() {
    assert_eq!(
        DomainName::parse("https://www.example.com").unwrap().as_str(),
        "example.com"
    );
}

#[test]
fn test_parse_strips_http_scheme() {
    assert_eq!(
        DomainName::parse("http://example.org").unwrap().as_str(),
        "example.org"
    );
}

#[test]
fn test_parse_strips_path_query_and_fragment() {
    assert_eq!(
        DomainName::parse("https://example.com/some/path?x=1#top")
            .unwrap()
            .as_str(),
        "example.com"
    );
    assert_eq!(
        DomainName::parse("example.com?x=1").unwrap().as_str(),
        "example.com"
    );
}

#[test]
fn test_parse_strips_port_and_trailing_dot() {
    assert_eq!(
        DomainName::parse("example.com:8080/path").unwrap().as_str(),
        "example.com"
    );
    assert_eq!(DomainName::parse("example.com.").unwrap().as_str(), "example.com");
}

#[test]
fn test_parse_lowercases() {
    assert_eq!(
        DomainName::parse("HTTPS://WWW.Example.COM").unwrap().as_str(),
        "example.com"
    );
}

#[test]
fn test_parse_keeps_subdomains_other_than_www() {
    assert_eq!(
        DomainName::parse("mail.example.co.uk").unwrap().as_str(),
        "mail.example.co.uk"
    );
}

#[test]
fn test_parse_only_strips_leading_www() {
    assert_eq!(
        DomainName::parse("mywww.example.com").unwrap().as_str(),
        "mywww.example.com"
    );
}

#[test]
fn test_parse_empty_is_rejected() {
    assert_eq!(DomainName::parse(""), Err(CheckError::EmptyDomain));
    assert_eq!(DomainName::parse("   \t"), Err(CheckError::EmptyDomain));
    assert_eq!(DomainName::parse("https://"), Err(CheckError::EmptyDomain));
}

#[test]
fn test_parse_requires_a_dot() {
    assert!(matches!(
        DomainName::parse("localhost"),
        Err(CheckError::InvalidDomain(_))
    ));
}

#[test]
fn test_parse_rejects_inner_whitespace() {
    assert!(matches!(
        DomainName::parse("exa mple.com"),
        Err(CheckError::InvalidDomain(_))
    ));
}

#[test]
fn test_parse_rejects_empty_labels() {
    assert!(matches!(
        DomainName::parse("example..com"),
        Err(CheckError::InvalidDomain(_))
    ));
    assert!(matches!(
        DomainName::parse(".example.com"),
        Err(CheckError::InvalidDomain(_))
    ));
}

#[test]
fn test_probe_names() {
    let domain = DomainName::parse("example.com").unwrap();
    assert_eq!(domain.dmarc_name(), "_dmarc.example.com");
    assert_eq!(domain.dkim_name("google"), "google._domainkey.example.com");
}

// Property-based tests using proptest
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_idempotent(
        label in "[a-v][a-z0-9-]{1,15}",
        tld in "(com|org|net|co\\.uk)",
        prefix in "(|https://|http://|https://www\\.|www\\.)",
        suffix in "(|/|/path|/a/b\\?q=1)"
    ) {
        let input = format!("{}{}.{}{}", prefix, label, tld, suffix);
        let first = DomainName::parse(&input);
        prop_assert!(first.is_ok());
        let first = first.unwrap();
        let second = DomainName::parse(first.as_str());
        prop_assert_eq!(Some(first.clone()), second.ok(),
            "Normalizing twice should produce same result");
        prop_assert_eq!(first.as_str(), format!("{}.{}", label, tld));
    }

    #[test]
    fn test_parse_no_panic(input in ".{0,100}") {
        let _ = DomainName::parse(&input);
    }
}
