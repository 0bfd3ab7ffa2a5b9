// Record parsing tests.

use super::*;
use crate::error_handling::ParseError;

fn keys(tags: &[ParsedTag]) -> Vec<&str> {
    tags.iter().map(|t| t.key.as_str()).collect()
}

#[test]
fn test_dmarc_strong_record_is_all_good() {
    let tags =
        analyze_dmarc_record("v=DMARC1; p=reject; rua=mailto:a@b.com; pct=100").unwrap();
    assert_eq!(tags.len(), 4);
    assert_eq!(keys(&tags), vec!["v", "p", "rua", "pct"]);
    assert!(tags.iter().all(|t| t.status == Severity::Good));
    assert!(!tags.iter().any(|t| t.is_missing_marker()));
}

#[test]
fn test_dmarc_missing_version_is_prepended() {
    let tags = analyze_dmarc_record("p=quarantine").unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].tag, "Missing: v");
    assert_eq!(tags[0].status, Severity::Warning);
    assert_eq!(tags[1].key, "p");
    assert_eq!(tags[1].value, "quarantine");
    assert_eq!(tags[1].status, Severity::Good);
}

#[test]
fn test_dmarc_missing_policy_is_appended() {
    let tags = analyze_dmarc_record("v=DMARC1; rua=mailto:x@y.com").unwrap();
    assert_eq!(tags.len(), 3);
    assert_eq!(tags.last().unwrap().tag, "Missing: p");
    assert_eq!(tags.last().unwrap().status, Severity::Warning);
}

#[test]
fn test_dmarc_both_missing_ordering() {
    let tags = analyze_dmarc_record("rua=mailto:x@y.com").unwrap();
    assert_eq!(tags.len(), 3);
    assert_eq!(tags[0].tag, "Missing: v");
    assert_eq!(tags[1].key, "rua");
    assert_eq!(tags[2].tag, "Missing: p");
}

#[test]
fn test_dmarc_pct_does_not_count_as_policy() {
    let tags = analyze_dmarc_record("v=DMARC1; pct=50").unwrap();
    assert_eq!(tags.last().unwrap().tag, "Missing: p");
}

#[test]
fn test_dmarc_empty_input() {
    assert_eq!(analyze_dmarc_record(""), Err(ParseError::EmptyInput));
    assert_eq!(analyze_dmarc_record("   \n"), Err(ParseError::EmptyInput));
}

#[test]
fn test_dmarc_only_separators() {
    assert_eq!(analyze_dmarc_record(";;; ;"), Err(ParseError::NoValidTags));
}

#[test]
fn test_dmarc_wrong_version_is_warning() {
    let tags = analyze_dmarc_record("v=DMARC2; p=none").unwrap();
    assert_eq!(tags[0].status, Severity::Warning);
    assert_eq!(tags[0].description, "Invalid version - should be DMARC1");
}

#[test]
fn test_dmarc_policy_descriptions_differ() {
    let none = analyze_dmarc_record("v=DMARC1; p=none").unwrap();
    let quarantine = analyze_dmarc_record("v=DMARC1; p=quarantine").unwrap();
    let reject = analyze_dmarc_record("v=DMARC1; p=reject").unwrap();
    assert!(none[1].description.contains("Monitoring only"));
    assert!(quarantine[1].description.contains("spam"));
    assert!(reject[1].description.contains("Strongest"));
}

#[test]
fn test_dmarc_invalid_policy_is_warning() {
    let tags = analyze_dmarc_record("v=DMARC1; p=block; sp=maybe").unwrap();
    assert_eq!(tags[1].status, Severity::Warning);
    assert_eq!(tags[1].description, "Invalid policy value");
    assert_eq!(tags[2].status, Severity::Warning);
    assert_eq!(tags[2].description, "Invalid subdomain policy");
}

#[test]
fn test_dmarc_report_uris_need_mailto() {
    let tags =
        analyze_dmarc_record("v=DMARC1; p=none; rua=reports@example.com; ruf=mailto:f@e.com")
            .unwrap();
    assert_eq!(tags[2].status, Severity::Warning);
    assert_eq!(tags[3].status, Severity::Good);
}

#[test]
fn test_dmarc_partial_pct_is_info() {
    let tags = analyze_dmarc_record("v=DMARC1; p=quarantine; pct=25").unwrap();
    assert_eq!(tags[2].status, Severity::Info);
    assert!(tags[2].description.contains("25%"));
    assert!(tags[2].description.contains("testing"));
}

#[test]
fn test_dmarc_alignment_is_always_info() {
    let tags = analyze_dmarc_record("v=DMARC1; p=none; adkim=s; aspf=r; aspf=x").unwrap();
    assert!(tags[2..].iter().all(|t| t.status == Severity::Info));
    assert!(tags[2].description.starts_with("Strict alignment"));
    assert!(tags[3].description.starts_with("Relaxed alignment"));
}

#[test]
fn test_dmarc_reporting_tags() {
    let tags = analyze_dmarc_record("v=DMARC1; p=none; fo=1; rf=afrf; ri=86400").unwrap();
    assert_eq!(tags[2].description, "Generate report if either SPF or DKIM fails");
    assert!(tags[3].description.contains("afrf"));
    assert_eq!(tags[4].description, "Reports sent every 86400 seconds (24 hours)");
    assert!(tags[2..].iter().all(|t| t.status == Severity::Info));
}

#[test]
fn test_dmarc_unknown_tags_pass_through() {
    let tags = analyze_dmarc_record("v=DMARC1; p=none; np=reject; custom").unwrap();
    assert_eq!(tags.len(), 4);
    assert_eq!(tags[2].tag, "np");
    assert_eq!(tags[2].value, "reject");
    assert_eq!(tags[2].description, "Unknown or custom tag");
    assert_eq!(tags[3].key, "custom");
    assert_eq!(tags[3].value, "");
}

#[test]
fn test_dmarc_splits_on_first_equals_and_trims() {
    let tags = analyze_dmarc_record("  v = DMARC1 ;p= none; rua = mailto:a@b.com?x=1 ").unwrap();
    assert_eq!(tags[0].value, "DMARC1");
    assert_eq!(tags[0].status, Severity::Good);
    assert_eq!(tags[1].value, "none");
    assert_eq!(tags[2].value, "mailto:a@b.com?x=1");
}

#[test]
fn test_spf_typical_record() {
    let analysis =
        analyze_spf_record("v=spf1 ip4:192.0.2.0/24 include:_spf.google.com -all").unwrap();
    assert_eq!(analysis.terms.len(), 3);
    assert_eq!(
        analysis.terms[0].kind,
        SpfTermKind::Mechanism(SpfMechanism::Ip4)
    );
    assert_eq!(analysis.terms[1].value.as_deref(), Some("_spf.google.com"));
    assert_eq!(analysis.terms[2].qualifier, Some(Qualifier::Fail));
    assert_eq!(analysis.dns_lookup_count, 1);
    assert!(!analysis.has_warnings());
    assert!(analysis.findings.is_empty());
}

#[test]
fn test_spf_plus_all_is_warning() {
    let analysis = analyze_spf_record("v=spf1 +all").unwrap();
    assert_eq!(analysis.terms[0].status, Severity::Warning);
    let analysis = analyze_spf_record("v=spf1 all").unwrap();
    assert_eq!(analysis.terms[0].qualifier, None);
    assert_eq!(analysis.terms[0].status, Severity::Warning);
}

#[test]
fn test_spf_soft_fail_is_info() {
    let analysis = analyze_spf_record("v=spf1 mx ~all").unwrap();
    assert_eq!(analysis.terms[1].status, Severity::Info);
    assert_eq!(analysis.dns_lookup_count, 1);
}

#[test]
fn test_spf_ptr_and_bad_ip_are_warnings() {
    let analysis = analyze_spf_record("v=spf1 ptr ip4:999.1.1.1 ip6:2001:db8::/129 -all").unwrap();
    assert_eq!(analysis.terms[0].status, Severity::Warning);
    assert_eq!(analysis.terms[1].status, Severity::Warning);
    assert_eq!(analysis.terms[2].status, Severity::Warning);
}

#[test]
fn test_spf_ip6_with_colons() {
    let analysis = analyze_spf_record("v=spf1 ip6:2001:db8::/32 -all").unwrap();
    assert_eq!(analysis.terms[0].value.as_deref(), Some("2001:db8::/32"));
    assert_eq!(analysis.terms[0].status, Severity::Good);
}

#[test]
fn test_spf_modifiers() {
    let analysis = analyze_spf_record("v=spf1 redirect=_spf.example.net exp=explain.example.net").unwrap();
    assert_eq!(
        analysis.terms[0].kind,
        SpfTermKind::Modifier("redirect".to_string())
    );
    assert_eq!(analysis.dns_lookup_count, 1);
    // redirect stands in for all
    assert!(analysis.findings.is_empty());
}

#[test]
fn test_spf_missing_all_is_noted() {
    let analysis = analyze_spf_record("v=spf1 include:example.net").unwrap();
    assert_eq!(analysis.findings.len(), 1);
    assert_eq!(analysis.findings[0].0, Severity::Info);
}

#[test]
fn test_spf_lookup_limit() {
    let includes: Vec<String> = (0..11).map(|i| format!("include:s{i}.example.com")).collect();
    let record = format!("v=spf1 {} -all", includes.join(" "));
    let analysis = analyze_spf_record(&record).unwrap();
    assert_eq!(analysis.dns_lookup_count, 11);
    assert!(analysis.has_warnings());
    assert!(analysis.findings[0].1.contains("exceeds"));

    let near: Vec<String> = (0..8).map(|i| format!("include:s{i}.example.com")).collect();
    let analysis = analyze_spf_record(&format!("v=spf1 {} -all", near.join(" "))).unwrap();
    assert_eq!(analysis.findings[0].0, Severity::Info);
}

#[test]
fn test_spf_unknown_mechanism() {
    let analysis = analyze_spf_record("v=spf1 foo:bar -all").unwrap();
    assert_eq!(analysis.terms[0].kind, SpfTermKind::Unknown);
    assert_eq!(analysis.terms[0].status, Severity::Warning);
}

#[test]
fn test_spf_errors() {
    let err = analyze_spf_record("   ").unwrap_err();
    assert_eq!(err, ParseError::EmptySpfInput);
    assert_eq!(err.to_string(), "Please enter an SPF record");
    assert_eq!(
        analyze_spf_record("v=DMARC1; p=none"),
        Err(ParseError::NotSpf)
    );
    assert!(analyze_spf_record("V=SPF1 -all").is_ok());
}

// Property-based tests using proptest
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_dmarc_analysis_is_deterministic(record in "[a-z=; :@.0-9A-Z]{0,80}") {
        let first = analyze_dmarc_record(&record);
        let second = analyze_dmarc_record(&record);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_dmarc_required_tag_markers(record in "(v=DMARC1; )?(p=none; )?(rua=mailto:a@b.c)?") {
        if let Ok(tags) = analyze_dmarc_record(&record) {
            let explicit_v = record.contains("v=DMARC1");
            let explicit_p = record.contains("p=none");
            prop_assert_eq!(tags[0].tag == "Missing: v", !explicit_v);
            prop_assert_eq!(tags.last().unwrap().tag == "Missing: p", !explicit_p);
        }
    }

    #[test]
    fn test_spf_analysis_no_panic(record in "v=spf1( [-+~?]?[a-z0-9:./=_]{0,20}){0,8}") {
        let _ = analyze_spf_record(&record);
    }
}
