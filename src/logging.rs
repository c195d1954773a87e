//! Tracing subscriber setup for binaries built on the client.
//!
//! The library crates log through the `log` facade; the subscriber installed
//! here bridges those records into `tracing`.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Map loose level names onto `EnvFilter` directives.
fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        _ => DEFAULT_FILTER,
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level`.
///
/// Fails if a global subscriber is already set.
pub fn init(level: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(normalize_level(level)));

    #[cfg(feature = "logs-json")]
    let fmt_layer = tracing_subscriber::fmt::layer().json();
    #[cfg(not(feature = "logs-json"))]
    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}

// ═══════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════
