//! Application initialization.
//!
//! Sets up the two shared resources a run needs:
//! - the logger (plain or JSON)
//! - the DNS resolver

mod logger;
mod resolver;

pub use logger::init_logger_with;
pub use resolver::{init_resolver, resolver_opts};
