//! Log output for the `dance-partner` binary.
//!
//! Everything goes to stderr so the tables written under the outputs folder
//! and anything piped from stdout stay clean. Verbosity is decided once at
//! start-up:
//!
//! * `RUST_LOG`, when set, is used as is.
//! * Otherwise `info` for every target.
//! * `--verbose` raises `dance_partner` targets to `debug` so skipped
//!   reference rows and ignored files are reported. Per-document progress
//!   from the `pairs` command moves to `info`.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const QUIET: &str = "info";
const VERBOSE: &str = "info,dance_partner=debug";

fn filter(verbose: bool) -> Result<EnvFilter> {
    let fallback = if verbose { VERBOSE } else { QUIET };
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?)
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_tracing(verbose: bool) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_line_number(verbose)
        .with_file(verbose)
        .with_filter(filter(verbose)?);

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::debug!(verbose, "tracing initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_crate_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(!filter(false).unwrap().to_string().contains("dance_partner"));
        assert!(filter(true).unwrap().to_string().contains("dance_partner=debug"));
    }
}
