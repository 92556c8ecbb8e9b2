//! Diagnostic logging setup
//!
//! Logs go to stderr. The default level only shows warnings; `--verbose`
//! enables debug output for this crate, and `RUST_LOG` overrides both.

use tracing_subscriber::EnvFilter;

/// Filter directive used when `RUST_LOG` is unset
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "bdist_venv=debug" } else { "warn" }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "bdist_venv=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
