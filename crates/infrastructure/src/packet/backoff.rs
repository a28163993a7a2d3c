use pyrewall_domain::config::PacketFilterConfig;
use std::time::Duration;
use tracing::warn;

const DEFAULT_INITIAL: Duration = Duration::from_millis(50);
const DEFAULT_MULTIPLIER: f64 = 1.3;
const DEFAULT_MAX: Duration = Duration::from_secs(1);
const DEFAULT_LOG_EVERY: u32 = 50;

/// Exponential backoff for consecutive reinject failures. Starting delay,
/// growth multiplier, clamp, and log threshold all come from
/// `PacketFilterConfig` (defaults: 50 ms, 1.3x, 1 s, every 50 failures).
pub struct ReinjectBackoff {
    initial: Duration,
    multiplier: f64,
    max: Duration,
    log_every: u32,
    current: Duration,
    consecutive_failures: u32,
}

impl Default for ReinjectBackoff {
    fn default() -> Self {
        Self {
            initial: DEFAULT_INITIAL,
            multiplier: DEFAULT_MULTIPLIER,
            max: DEFAULT_MAX,
            log_every: DEFAULT_LOG_EVERY,
            current: DEFAULT_INITIAL,
            consecutive_failures: 0,
        }
    }
}

impl ReinjectBackoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PacketFilterConfig) -> Self {
        let initial = Duration::from_millis(config.reinject_backoff_initial_ms);
        Self {
            initial,
            multiplier: config.reinject_backoff_multiplier,
            max: Duration::from_millis(config.reinject_backoff_max_ms),
            log_every: config.reinject_failure_log_threshold.max(1),
            current: initial,
            consecutive_failures: 0,
        }
    }

    /// Records a failure, returns the delay to sleep before the next retry.
    pub fn fail(&mut self) -> Duration {
        self.consecutive_failures += 1;
        if self.consecutive_failures % self.log_every == 0 {
            warn!(
                consecutive_failures = self.consecutive_failures,
                delay_ms = self.current.as_millis(),
                "reinject failing repeatedly"
            );
        }

        let delay = self.current;
        let next_ms = (self.current.as_secs_f64() * self.multiplier * 1000.0) as u64;
        self.current = Duration::from_millis(next_ms).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
        self.consecutive_failures = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_and_clamps_at_one_second() {
        let mut backoff = ReinjectBackoff::new();
        let mut last = Duration::ZERO;
        for _ in 0..200 {
            let delay = backoff.fail();
            assert!(delay >= last || delay == DEFAULT_MAX);
            last = delay;
        }
        assert_eq!(last, DEFAULT_MAX);
    }

    #[test]
    fn reset_restores_initial_delay() {
        let mut backoff = ReinjectBackoff::new();
        for _ in 0..10 {
            backoff.fail();
        }
        backoff.reset();
        assert_eq!(backoff.fail(), DEFAULT_INITIAL);
    }
}
