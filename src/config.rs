//! Configuration for session bootstrap behavior.
//!
//! All timing knobs that govern the bootstrap/cache/fallback sequence
//! live here. Use `VestibuleConfig::default()` for production defaults.
//!
//! # Example
//!
//! ```rust
//! use vestibule::config::VestibuleConfig;
//! use chrono::Duration;
//!
//! // Use defaults
//! let config = VestibuleConfig::default();
//!
//! // Or customize
//! let config = VestibuleConfig {
//!     cache_ttl: Duration::minutes(10),
//!     ..Default::default()
//! };
//! ```

use chrono::{DateTime, Duration, Utc};

/// Configuration for the session bootstrap sequence.
#[derive(Debug, Clone)]
pub struct VestibuleConfig {
    /// How long a cached snapshot is considered fresh.
    ///
    /// A fresh snapshot short-circuits the bootstrap without any
    /// network calls. A stale one triggers a refetch but may still
    /// serve as a last-resort fallback.
    ///
    /// Default: 5 minutes
    pub cache_ttl: Duration,

    /// Per-call timeout for each backend fetch.
    ///
    /// Each real call is raced against a timer; the first to settle wins.
    ///
    /// Default: 15 seconds
    pub fetch_timeout: Duration,

    /// Hard deadline for an entire bootstrap invocation.
    ///
    /// Guarantees the loading flag clears even if a step hangs
    /// unexpectedly. Independent of the per-call timeouts.
    ///
    /// Default: 10 seconds
    pub bootstrap_deadline: Duration,

    /// Cutoff for the launch period benefit.
    ///
    /// Before this instant, resolved stats get the launch benefit
    /// applied (see [`promo`](crate::promo)). After it, the benefit
    /// is a no-op pass-through.
    pub launch_cutoff: DateTime<Utc>,
}

impl Default for VestibuleConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::minutes(5),
            fetch_timeout: Duration::seconds(15),
            bootstrap_deadline: Duration::seconds(10),
            launch_cutoff: crate::promo::default_launch_cutoff(),
        }
    }
}

impl VestibuleConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration suitable for development/testing.
    ///
    /// Uses a short cache lifetime and aggressive timeouts so failures
    /// surface quickly.
    pub fn development() -> Self {
        Self {
            cache_ttl: Duration::seconds(30),
            fetch_timeout: Duration::seconds(5),
            bootstrap_deadline: Duration::seconds(3),
            launch_cutoff: crate::promo::default_launch_cutoff(),
        }
    }
}

/// Converts a chrono duration into a std duration for tokio timers.
///
/// Negative durations clamp to zero, which makes the associated timer
/// fire immediately.
pub(crate) fn to_std(duration: Duration) -> std::time::Duration {
    duration.to_std().unwrap_or(std::time::Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VestibuleConfig::default();

        assert_eq!(config.cache_ttl, Duration::minutes(5));
        assert_eq!(config.fetch_timeout, Duration::seconds(15));
        assert_eq!(config.bootstrap_deadline, Duration::seconds(10));
    }

    #[test]
    fn test_development_config() {
        let config = VestibuleConfig::development();

        assert_eq!(config.cache_ttl, Duration::seconds(30));
        assert_eq!(config.fetch_timeout, Duration::seconds(5));
    }

    #[test]
    fn test_to_std_clamps_negative() {
        assert_eq!(to_std(Duration::seconds(-1)), std::time::Duration::ZERO);
        assert_eq!(
            to_std(Duration::seconds(2)),
            std::time::Duration::from_secs(2)
        );
    }
}
