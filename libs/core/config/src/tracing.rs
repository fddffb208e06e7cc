use crate::Environment;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the color-eyre panic and error report hooks.
///
/// Call before anything fallible in `main`. Repeated installs are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Set up the global tracing subscriber for the given environment.
///
/// Production gets flattened JSON events for log aggregation; development
/// gets the pretty human-readable format. Both carry an `ErrorLayer` so
/// eyre reports include span traces. `RUST_LOG` overrides the default
/// filter (`info` in production, `debug` otherwise).
///
/// Calling this twice is harmless: a second `try_init` fails quietly, which
/// is the usual situation in test binaries.
pub fn init_tracing(environment: &Environment) {
    let default_filter = if environment.is_production() {
        "info,tower_http=info"
    } else {
        "debug"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let initialized = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
            .is_ok()
    };

    if initialized {
        tracing::info!(?environment, "Tracing initialized");
    }
}
