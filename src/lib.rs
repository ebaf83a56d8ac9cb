//! # DovetailKit
//!
//! Generates cut paths for through-dovetail joints milled with a CNC router.
//!
//! ## Architecture
//!
//! DovetailKit is organized as a workspace with multiple crates:
//!
//! 1. **dovetailkit-core** - Measurement systems and unit conversion
//! 2. **dovetailkit-camtools** - Joint validation, cut layout, shape sink
//! 3. **dovetailkit-settings** - Config files for defaults and layout tunables
//! 4. **dovetailkit** - Command-line host that ties the crates together

pub mod cli;

pub use dovetailkit_camtools::{
    generate, generate_with, resolve, CutShape, JointLayout, JointParameters, LayoutSettings,
    ResolvedGeometry, RoutingClassification, ValidationFailure,
};
pub use dovetailkit_settings::Config;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Events go to stderr so stdout stays free for command output. Directives in
/// `RUST_LOG` take precedence; without them the level is INFO, or DEBUG with
/// `verbose`. `json` switches to one JSON object per event.
pub fn init_logging(verbose: bool, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let env_filter = log_filter(verbose, &directives);

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    Ok(())
}

/// Filter for `directives` in `RUST_LOG` syntax, falling back to the verbosity
/// level when they name none. Invalid directives are skipped.
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(filter: &EnvFilter) -> Option<LevelFilter> {
        filter.max_level_hint()
    }

    #[test]
    fn test_log_filter_defaults_to_verbosity() {
        assert_eq!(hint(&log_filter(false, "")), Some(LevelFilter::INFO));
        assert_eq!(hint(&log_filter(true, "")), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_rust_log_overrides_verbosity() {
        assert_eq!(hint(&log_filter(false, "warn")), Some(LevelFilter::WARN));
        assert_eq!(hint(&log_filter(true, "warn")), Some(LevelFilter::WARN));
        assert_eq!(hint(&log_filter(false, "trace")), Some(LevelFilter::TRACE));
        assert_eq!(
            hint(&log_filter(false, "dovetailkit_camtools=trace")),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_invalid_directives_fall_back_to_default() {
        assert_eq!(hint(&log_filter(false, "dovetailkit=loud")), Some(LevelFilter::INFO));
    }
}
