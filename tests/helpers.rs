// Shared test helpers: canned DNS zones and checkers.

use mail_auth_check::{AuthResolver, CheckError, DomainChecker, StaticLookup, VerificationResult};

/// A zone with one fully configured domain, one DMARC-only domain and one
/// domain whose records are all wrong.
#[allow(dead_code)] // Used by other test files
pub fn sample_lookup() -> StaticLookup {
    StaticLookup::new()
        .with_txt("_dmarc.secure.example", ["v=DMARC1; p=reject; rua=mailto:d@secure.example"])
        .with_txt(
            "secure.example",
            ["google-site-verification=abc", "v=spf1 include:_spf.google.com -all"],
        )
        .with_txt("selector1._domainkey.secure.example", ["v=DKIM1; k=rsa; p=MIIB"])
        .with_txt("_dmarc.dmarc-only.example", ["v=DMARC1; p=none"])
        .with_txt("_dmarc.sloppy.example", ["DMARC1; p=reject"])
        .with_txt("sloppy.example", ["spf1 -all"])
}

#[allow(dead_code)] // Used by other test files
pub fn sample_resolver() -> AuthResolver<StaticLookup> {
    AuthResolver::with_default_selectors(sample_lookup())
}

/// Delegates to a real resolver but fails every check of `fail_on`.
#[allow(dead_code)] // Used by other test files
pub struct FailingChecker {
    pub inner: AuthResolver<StaticLookup>,
    pub fail_on: &'static str,
}

impl DomainChecker for FailingChecker {
    async fn check_domain(&self, input: &str) -> Result<VerificationResult, CheckError> {
        if input == self.fail_on {
            return Err(CheckError::Resolution("connection reset by peer".to_string()));
        }
        self.inner.check_domain(input).await
    }
}
