//! DNS resolver initialization.

use std::time::Duration;

use crate::config::DNS_ATTEMPTS;
use crate::error_handling::InitializationError;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Builds resolver options with a per-query timeout.
///
/// `ndots` is 0 so queries for `_dmarc.example.com` are never expanded with
/// search domains.
pub fn resolver_opts(timeout_secs: u64) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(timeout_secs);
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;
    opts
}

/// Initializes the DNS resolver used for TXT lookups.
///
/// The system configuration (`/etc/resolv.conf`) is preferred; when it cannot
/// be read the resolver falls back to hickory's default upstreams.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` for a zero timeout.
pub fn init_resolver(timeout_secs: u64) -> Result<TokioAsyncResolver, InitializationError> {
    if timeout_secs == 0 {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be at least one second".to_string(),
        ));
    }

    let opts = resolver_opts(timeout_secs);
    let config = match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, _)) => config,
        Err(e) => {
            log::debug!("Falling back to default DNS servers: {e}");
            ResolverConfig::default()
        }
    };

    Ok(TokioAsyncResolver::tokio(config, opts))
}
