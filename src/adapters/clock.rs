use crate::domain::ports::Clock;
use chrono::{DateTime, Days, Utc};
use std::sync::RwLock;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a settable instant, for tests and `--now` runs.
#[derive(Debug)]
pub struct FixedClock {
    instant: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: RwLock::new(instant),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        match self.instant.write() {
            Ok(mut guard) => *guard = instant,
            Err(poisoned) => *poisoned.into_inner() = instant,
        }
    }

    /// Moves the clock forward by whole calendar days. Leaves it unchanged
    /// when the result would be out of range.
    pub fn advance_days(&self, days: u64) {
        match self.now().checked_add_days(Days::new(days)) {
            Some(next) => self.set(next),
            None => tracing::warn!("Cannot advance clock by {} days: out of range", days),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.instant.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn fixed_clock_can_be_moved() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap());
        clock.advance_days(2);
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 1, 12, 8, 0, 0).unwrap());

        let later = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        clock.set(later);
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn advancing_past_the_calendar_range_keeps_the_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let clock = FixedClock::new(instant);
        clock.advance_days(u64::MAX);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
