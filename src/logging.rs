//! Logging initialization using the `tracing` ecosystem.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "plant_identifier=info,tower_http=info";
const VERBOSE_FILTER: &str = "plant_identifier=debug,tower_http=debug";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter when set.
pub fn init(verbose: bool, json_format: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
