//! DMARC and SPF record builders.
//!
//! Produce TXT record values ready to publish at `_dmarc.<domain>` and at the
//! domain apex.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SPF_MAX_DNS_LOOKUPS;
use crate::parse::Qualifier;

/// Include targets of widely used mail providers, as (name, include domain).
pub const COMMON_SPF_PROVIDERS: [(&str, &str); 6] = [
    ("Google Workspace", "_spf.google.com"),
    ("Microsoft 365", "spf.protection.outlook.com"),
    ("SendGrid", "sendgrid.net"),
    ("Mailchimp", "servers.mcsv.net"),
    ("HubSpot", "include.hubspot.com"),
    ("Zendesk", "mail.zendesk.com"),
];

/// DMARC policy (`p=` / `sp=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DmarcPolicy {
    #[default]
    None,
    Quarantine,
    Reject,
}

impl DmarcPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DmarcPolicy::None => "none",
            DmarcPolicy::Quarantine => "quarantine",
            DmarcPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for DmarcPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier alignment mode (`adkim=` / `aspf=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Relaxed,
    Strict,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Relaxed => "r",
            Alignment::Strict => "s",
        }
    }
}

/// Builds a DMARC record.
///
/// Tags are emitted in a fixed order: `v`, `p`, `rua`, `ruf`, `pct`, `sp`,
/// `adkim`, `aspf`. Defaults (`pct=100`, relaxed alignment) are omitted.
///
/// ```
/// use mail_auth_check::generate::{DmarcPolicy, DmarcRecordBuilder};
///
/// let record = DmarcRecordBuilder::new(DmarcPolicy::Quarantine)
///     .rua("dmarc@example.com")
///     .pct(50)
///     .build();
/// assert_eq!(record, "v=DMARC1; p=quarantine; rua=mailto:dmarc@example.com; pct=50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmarcRecordBuilder {
    policy: DmarcPolicy,
    rua: Option<String>,
    ruf: Option<String>,
    pct: u8,
    subdomain_policy: Option<DmarcPolicy>,
    adkim: Alignment,
    aspf: Alignment,
}

impl Default for DmarcRecordBuilder {
    fn default() -> Self {
        Self::new(DmarcPolicy::None)
    }
}

impl DmarcRecordBuilder {
    pub fn new(policy: DmarcPolicy) -> Self {
        Self {
            policy,
            rua: None,
            ruf: None,
            pct: 100,
            subdomain_policy: None,
            adkim: Alignment::Relaxed,
            aspf: Alignment::Relaxed,
        }
    }

    /// Aggregate report address, without the `mailto:` scheme.
    pub fn rua(mut self, email: impl Into<String>) -> Self {
        self.rua = non_blank(email.into());
        self
    }

    /// Forensic report address, without the `mailto:` scheme.
    pub fn ruf(mut self, email: impl Into<String>) -> Self {
        self.ruf = non_blank(email.into());
        self
    }

    /// Percentage of mail the policy applies to. Values above 100 are capped.
    pub fn pct(mut self, pct: u8) -> Self {
        self.pct = pct.min(100);
        self
    }

    pub fn subdomain_policy(mut self, policy: DmarcPolicy) -> Self {
        self.subdomain_policy = Some(policy);
        self
    }

    pub fn adkim(mut self, alignment: Alignment) -> Self {
        self.adkim = alignment;
        self
    }

    pub fn aspf(mut self, alignment: Alignment) -> Self {
        self.aspf = alignment;
        self
    }

    pub fn build(&self) -> String {
        let mut parts = vec!["v=DMARC1".to_string(), format!("p={}", self.policy)];
        if let Some(rua) = &self.rua {
            parts.push(format!("rua=mailto:{rua}"));
        }
        if let Some(ruf) = &self.ruf {
            parts.push(format!("ruf=mailto:{ruf}"));
        }
        if self.pct != 100 {
            parts.push(format!("pct={}", self.pct));
        }
        if let Some(sp) = self.subdomain_policy {
            parts.push(format!("sp={sp}"));
        }
        if self.adkim != Alignment::Relaxed {
            parts.push(format!("adkim={}", self.adkim.as_str()));
        }
        if self.aspf != Alignment::Relaxed {
            parts.push(format!("aspf={}", self.aspf.as_str()));
        }
        parts.join("; ")
    }
}

/// Builds an SPF record from addresses, includes and a final `all`.
///
/// Blank entries are skipped. Addresses come first since they cost no DNS
/// lookups at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpfRecordBuilder {
    ip4: Vec<String>,
    ip6: Vec<String>,
    includes: Vec<String>,
    all: Qualifier,
}

impl Default for SpfRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SpfRecordBuilder {
    /// Starts an empty record ending in `-all`.
    pub fn new() -> Self {
        Self {
            ip4: Vec::new(),
            ip6: Vec::new(),
            includes: Vec::new(),
            all: Qualifier::Fail,
        }
    }

    pub fn ip4(mut self, range: impl Into<String>) -> Self {
        push_non_blank(&mut self.ip4, range.into());
        self
    }

    pub fn ip6(mut self, range: impl Into<String>) -> Self {
        push_non_blank(&mut self.ip6, range.into());
        self
    }

    pub fn include(mut self, domain: impl Into<String>) -> Self {
        push_non_blank(&mut self.includes, domain.into());
        self
    }

    pub fn all(mut self, qualifier: Qualifier) -> Self {
        self.all = qualifier;
        self
    }

    /// DNS lookups the record costs; only includes are added by this builder.
    pub fn lookup_count(&self) -> usize {
        self.includes.len()
    }

    pub fn is_over_lookup_limit(&self) -> bool {
        self.lookup_count() > SPF_MAX_DNS_LOOKUPS
    }

    pub fn build(&self) -> String {
        let mut parts = vec!["v=spf1".to_string()];
        parts.extend(self.ip4.iter().map(|ip| format!("ip4:{ip}")));
        parts.extend(self.ip6.iter().map(|ip| format!("ip6:{ip}")));
        parts.extend(self.includes.iter().map(|inc| format!("include:{inc}")));
        parts.push(format!("{}all", self.all.symbol()));
        parts.join(" ")
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn push_non_blank(list: &mut Vec<String>, value: String) {
    if let Some(value) = non_blank(value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{analyze_dmarc_record, analyze_spf_record, Severity};

    #[test]
    fn test_dmarc_minimal() {
        assert_eq!(DmarcRecordBuilder::default().build(), "v=DMARC1; p=none");
    }

    #[test]
    fn test_dmarc_all_options() {
        let record = DmarcRecordBuilder::new(DmarcPolicy::Reject)
            .rua("agg@example.com")
            .ruf("fail@example.com")
            .pct(25)
            .subdomain_policy(DmarcPolicy::Quarantine)
            .adkim(Alignment::Strict)
            .aspf(Alignment::Strict)
            .build();
        assert_eq!(
            record,
            "v=DMARC1; p=reject; rua=mailto:agg@example.com; ruf=mailto:fail@example.com; pct=25; sp=quarantine; adkim=s; aspf=s"
        );
    }

    #[test]
    fn test_dmarc_defaults_omitted() {
        let record = DmarcRecordBuilder::new(DmarcPolicy::Quarantine)
            .rua("  ")
            .pct(100)
            .adkim(Alignment::Relaxed)
            .build();
        assert_eq!(record, "v=DMARC1; p=quarantine");
    }

    #[test]
    fn test_dmarc_pct_capped() {
        let record = DmarcRecordBuilder::default().pct(250).build();
        assert_eq!(record, "v=DMARC1; p=none");
    }

    #[test]
    fn test_generated_dmarc_analyzes_cleanly() {
        let record = DmarcRecordBuilder::new(DmarcPolicy::Reject)
            .rua("agg@example.com")
            .subdomain_policy(DmarcPolicy::Reject)
            .build();
        let tags = analyze_dmarc_record(&record).unwrap();
        assert!(tags.iter().all(|t| t.status != Severity::Warning));
        assert!(!tags.iter().any(|t| t.is_missing_marker()));
    }

    #[test]
    fn test_spf_build() {
        let builder = SpfRecordBuilder::new()
            .ip4("192.0.2.0/24")
            .ip6("2001:db8::/32")
            .include("_spf.google.com")
            .include(" ")
            .all(Qualifier::SoftFail);
        assert_eq!(
            builder.build(),
            "v=spf1 ip4:192.0.2.0/24 ip6:2001:db8::/32 include:_spf.google.com ~all"
        );
        assert_eq!(builder.lookup_count(), 1);
    }

    #[test]
    fn test_spf_empty_is_hard_fail() {
        assert_eq!(SpfRecordBuilder::default().build(), "v=spf1 -all");
    }

    #[test]
    fn test_spf_lookup_limit() {
        let builder = COMMON_SPF_PROVIDERS
            .iter()
            .chain(COMMON_SPF_PROVIDERS.iter())
            .fold(SpfRecordBuilder::new(), |b, (_, include)| b.include(*include));
        assert_eq!(builder.lookup_count(), 12);
        assert!(builder.is_over_lookup_limit());

        let analysis = analyze_spf_record(&builder.build()).unwrap();
        assert_eq!(analysis.dns_lookup_count, 12);
        assert!(analysis.has_warnings());
    }

    #[test]
    fn test_generated_spf_analyzes_cleanly() {
        let record = SpfRecordBuilder::new()
            .ip4("203.0.113.7")
            .include("spf.protection.outlook.com")
            .build();
        let analysis = analyze_spf_record(&record).unwrap();
        assert!(!analysis.has_warnings());
        assert!(analysis.findings.is_empty());
    }
}
