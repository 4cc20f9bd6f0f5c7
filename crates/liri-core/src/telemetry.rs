use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Environment variable holding the diagnostics filter; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "LIRI_LOG";

/// Initialize JSON diagnostics on stderr. Safe to call multiple times.
pub fn init() {
    LOGGING.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
