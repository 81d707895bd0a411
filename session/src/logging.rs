//! Tracing subscriber setup.

use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber once. `CDG_LOG` overrides the filter.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default = if verbose { "cdg=debug" } else { "cdg=info" };
        let filter = EnvFilter::try_from_env("CDG_LOG").unwrap_or_else(|_| EnvFilter::new(default));
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .try_init();
    });
}
