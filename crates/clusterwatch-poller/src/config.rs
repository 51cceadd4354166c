//! Poller timing configuration.

use std::time::Duration;

use rand::Rng;

/// Timing knobs for a [`HealthPoller`](crate::HealthPoller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Fixed part of the re-poll delay.
    pub base_delay: Duration,
    /// Upper bound of the random part, in whole milliseconds.
    pub max_jitter_ms: u64,
    /// Per-request timeout. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(2000),
            max_jitter_ms: 1000,
            request_timeout: None,
        }
    }
}

impl PollerConfig {
    /// Draw the next re-poll delay: `base_delay + uniform(1..=max_jitter_ms)`.
    ///
    /// The jitter spreads requests from several pollers watching the same
    /// backend. With the defaults the delay lies in `[2001, 3000]` ms.
    pub fn next_delay(&self) -> Duration {
        let jitter = if self.max_jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(1..=self.max_jitter_ms)
        };
        self.base_delay + Duration::from_millis(jitter)
    }

    /// Smallest delay [`next_delay`](Self::next_delay) can return.
    pub fn min_delay(&self) -> Duration {
        self.base_delay + Duration::from_millis(self.max_jitter_ms.min(1))
    }

    /// Largest delay [`next_delay`](Self::next_delay) can return.
    pub fn max_delay(&self) -> Duration {
        self.base_delay + Duration::from_millis(self.max_jitter_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_2001_to_3000_ms() {
        let config = PollerConfig::default();
        assert_eq!(config.min_delay(), Duration::from_millis(2001));
        assert_eq!(config.max_delay(), Duration::from_millis(3000));

        for _ in 0..2000 {
            let delay = config.next_delay();
            assert!(delay >= Duration::from_millis(2001), "{delay:?} too short");
            assert!(delay <= Duration::from_millis(3000), "{delay:?} too long");
        }
    }

    #[test]
    fn delays_are_whole_milliseconds() {
        let config = PollerConfig::default();
        for _ in 0..100 {
            assert_eq!(config.next_delay().subsec_nanos() % 1_000_000, 0);
        }
    }

    #[test]
    fn zero_jitter_is_fixed() {
        let config = PollerConfig {
            base_delay: Duration::from_millis(500),
            max_jitter_ms: 0,
            request_timeout: None,
        };
        assert_eq!(config.next_delay(), Duration::from_millis(500));
        assert_eq!(config.min_delay(), config.max_delay());
    }

    #[test]
    fn jitter_actually_varies() {
        let config = PollerConfig::default();
        let first = config.next_delay();
        assert!((0..200).any(|_| config.next_delay() != first));
    }
}
