//! Subscriber setup for SmartTable's `tracing` events.
//!
//! Navigation, stabilization and tracking emit events under the
//! `smarttable` target. `RUST_LOG` overrides the level passed in.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install a human-readable console subscriber.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(level: &str) -> bool {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

/// Install a JSON subscriber (one object per line).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing_json(level: &str) -> bool {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(fmt::layer().json().with_current_span(false))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_harmless() {
        init_tracing("smarttable=debug");
        assert!(!init_tracing("smarttable=trace"));
        assert!(!init_tracing_json("info"));
    }
}
