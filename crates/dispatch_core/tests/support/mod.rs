#![allow(dead_code)]

use std::time::{Duration, Instant};

/// Poll `condition` until it holds or `timeout` elapses; returns whether it
/// held.
pub fn wait_until<F: FnMut() -> bool>(mut condition: F, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}
