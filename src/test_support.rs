use crate::config::SimConfig;
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound for any single wait in a test before it is declared hung.
pub(crate) const PATIENCE: Duration = Duration::from_secs(10);

/// Poll `condition` until it holds, panicking after [`PATIENCE`].
///
/// Only tests observe state this way; the primitives themselves never poll.
pub(crate) fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + PATIENCE;
    while !condition() {
        if Instant::now() > deadline {
            panic!("timed out waiting for {}", what);
        }
        thread::sleep(Duration::from_millis(1));
    }
}

/// A small, fast, deterministic simulation config.
pub(crate) fn quick_config() -> SimConfig {
    SimConfig {
        participants_a: 5,
        participants_b: 5,
        max_arrival_delay_ms: 20,
        usage_min_ms: 10,
        usage_max_ms: 10,
        seed: Some(7),
        echo: false,
        ..SimConfig::default()
    }
}
