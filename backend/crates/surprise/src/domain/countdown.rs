//! Countdown
//!
//! Remaining time to a [`TargetInstant`], recomputed from scratch on every
//! tick. Completion is latched: the first tick at or past the target
//! reports it, every later tick does not.

use chrono::{DateTime, Utc};

use crate::domain::value_object::target_instant::TargetInstant;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Remaining duration split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    pub const ZERO: TimeLeft = TimeLeft {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Floor-divide a millisecond difference. Non-positive input is zero.
    pub fn from_millis(remaining_ms: i64) -> Self {
        if remaining_ms <= 0 {
            return Self::ZERO;
        }
        Self {
            days: remaining_ms / MILLIS_PER_DAY,
            hours: (remaining_ms / MILLIS_PER_HOUR) % 24,
            minutes: (remaining_ms / MILLIS_PER_MINUTE) % 60,
            seconds: (remaining_ms / MILLIS_PER_SECOND) % 60,
        }
    }
}

/// Latest snapshot of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownState {
    pub time_left: TimeLeft,
    pub is_complete: bool,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    target: TargetInstant,
    state: CountdownState,
}

impl Countdown {
    pub fn new(target: TargetInstant) -> Self {
        Self {
            target,
            state: CountdownState::default(),
        }
    }

    /// Recompute against `now`.
    ///
    /// Returns `true` only on the tick that first observes completion.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.state.is_complete {
            return false;
        }

        let remaining = self.target.remaining_millis(now);
        self.state.time_left = TimeLeft::from_millis(remaining);
        if remaining <= 0 {
            self.state.is_complete = true;
            return true;
        }
        false
    }

    #[inline]
    pub fn state(&self) -> CountdownState {
        self.state
    }

    #[inline]
    pub fn target(&self) -> TargetInstant {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap() + TimeDelta::seconds(secs)
    }

    #[test]
    fn test_decomposition_of_90061_seconds() {
        assert_eq!(
            TimeLeft::from_millis(90_061 * 1_000),
            TimeLeft {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn test_decomposition_floors() {
        assert_eq!(
            TimeLeft::from_millis(59_999),
            TimeLeft {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 59
            }
        );
        assert_eq!(TimeLeft::from_millis(999), TimeLeft::ZERO);
        assert_eq!(TimeLeft::from_millis(3 * MILLIS_PER_DAY).days, 3);
        assert_eq!(TimeLeft::from_millis(3 * MILLIS_PER_DAY).hours, 0);
    }

    #[test]
    fn test_non_positive_is_zero() {
        assert_eq!(TimeLeft::from_millis(0), TimeLeft::ZERO);
        assert_eq!(TimeLeft::from_millis(-5_000), TimeLeft::ZERO);
    }

    #[test]
    fn test_running_countdown_reports_time_left() {
        let mut countdown = Countdown::new(TargetInstant::new(at(3_661)));
        assert!(!countdown.tick(at(0)));

        let state = countdown.state();
        assert!(!state.is_complete);
        assert_eq!(
            state.time_left,
            TimeLeft {
                days: 0,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let mut countdown = Countdown::new(TargetInstant::new(at(2)));

        let fired: Vec<bool> = (0..6).map(|s| countdown.tick(at(s))).collect();
        assert_eq!(fired, vec![false, false, true, false, false, false]);
        assert!(countdown.state().is_complete);
        assert_eq!(countdown.state().time_left, TimeLeft::ZERO);
    }

    #[test]
    fn test_past_target_completes_on_first_tick() {
        let mut countdown = Countdown::new(TargetInstant::new(at(0)));
        assert!(countdown.tick(at(86_400)));
        assert!(!countdown.tick(at(86_401)));
    }

    #[test]
    fn test_completion_survives_clock_going_backwards() {
        let mut countdown = Countdown::new(TargetInstant::new(at(10)));
        assert!(countdown.tick(at(10)));
        assert!(!countdown.tick(at(0)));
        assert!(countdown.state().is_complete);
    }
}
