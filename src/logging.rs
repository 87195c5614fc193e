//! Tracing setup
//!
//! Log output goes to stderr so it never mixes with command output. The filter
//! is read from `FINPLAN_LOG` (e.g. `FINPLAN_LOG=finplan=debug`).

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FINPLAN_LOG";

const DEFAULT_FILTER: &str = "finplan=warn";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber; later calls do nothing
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // another subscriber may already be installed (tests)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
