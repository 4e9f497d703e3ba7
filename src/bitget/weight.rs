//! Request weight accounting for the Bitget public API

use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::warn;

/// Default weight budget per window
pub const DEFAULT_MAX_WEIGHT: u32 = 1000;

/// Length of the accounting window
pub const WEIGHT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Window {
    started: Instant,
    used: u32,
}

/// Counts request weight in a rolling one-minute window
///
/// Exceeding the budget only logs a warning; requests are never delayed.
#[derive(Debug)]
pub struct RequestWeight {
    max_weight: u32,
    window: Mutex<Window>,
}

impl RequestWeight {
    pub fn new(max_weight: u32) -> Self {
        Self {
            max_weight,
            window: Mutex::new(Window {
                started: Instant::now(),
                used: 0,
            }),
        }
    }

    /// Budget per window
    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// Record one request, returning false when the budget is exhausted
    pub fn check_weight(&self) -> bool {
        self.check_weight_at(Instant::now())
    }

    fn check_weight_at(&self, now: Instant) -> bool {
        let mut window = self.window.lock().unwrap_or_else(|e| e.into_inner());
        if now.duration_since(window.started) >= WEIGHT_WINDOW {
            window.started = now;
            window.used = 0;
        }

        window.used += 1;
        if window.used > self.max_weight {
            warn!(
                "Request weight {} exceeds limit of {} per minute",
                window.used, self.max_weight
            );
            return false;
        }
        true
    }

    /// Weight used in the current window
    pub fn used(&self) -> u32 {
        self.window.lock().unwrap_or_else(|e| e.into_inner()).used
    }
}

impl Default for RequestWeight {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_exhaustion() {
        let weight = RequestWeight::new(2);
        assert!(weight.check_weight());
        assert!(weight.check_weight());
        assert!(!weight.check_weight());
        assert_eq!(weight.used(), 3);
    }

    #[test]
    fn test_window_resets() {
        let weight = RequestWeight::new(1);
        let start = Instant::now();
        assert!(weight.check_weight_at(start));
        assert!(!weight.check_weight_at(start));
        assert!(weight.check_weight_at(start + WEIGHT_WINDOW + Duration::from_secs(1)));
        assert_eq!(weight.used(), 1);
    }
}
