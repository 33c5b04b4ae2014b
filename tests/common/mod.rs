//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// `10, 11, ...` as `f64`, the pattern the round-trip tests write.
pub fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i + 10) as f64).collect()
}
