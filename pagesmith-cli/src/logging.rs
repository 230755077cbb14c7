//! Diagnostic logging with `tracing-subscriber`.
//!
//! Library events go to stderr so they never mix with reports on stdout.
//! `RUST_LOG` overrides the level picked from the command line.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is not set.
pub fn default_level(verbose: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("warn,pagesmith={level},pagesmith_cli={level}"))
    })
}

/// Install the global subscriber.
///
/// Installing twice is a no-op.
pub fn init(verbose: bool, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(default_level(verbose, quiet)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
