//! Time Abstraction
//!
//! Provides an injectable time source so expiry logic can be tested
//! deterministically.

use chrono::{DateTime, Utc};

/// Time source trait
///
/// # Example
///
/// ```ignore
/// use bridge_traits::time::Clock;
///
/// fn is_stale(clock: &dyn Clock, expires_at: DateTime<Utc>) -> bool {
///     clock.now() >= expires_at
/// }
/// ```
pub trait Clock: Send + Sync {
    /// Get current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation using actual system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock() {
        let before = Utc::now();
        let now = SystemClock.now();

        assert!(now >= before);
        assert!(now <= Utc::now());
    }
}
