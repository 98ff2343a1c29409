use crate::error::InvalidDuration;
use serde::{Deserialize, Serialize};

/// Time value as the player reports it. Extra fields such as
/// `milliseconds` are ignored on the way in and never sent back.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Duration {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Duration {
    pub fn new(hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn to_seconds(&self) -> i64 {
        3600 * self.hours + 60 * self.minutes + self.seconds
    }

    pub fn from_seconds(total: u64) -> Self {
        let total = i64::try_from(total).unwrap_or(i64::MAX);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    /// `H:MM:SS` with hours, `M:SS` without.
    pub fn format(&self) -> Result<String, InvalidDuration> {
        if self.hours < 0 || self.minutes < 0 || self.seconds < 0 {
            return Err(InvalidDuration {
                hours: self.hours,
                minutes: self.minutes,
                seconds: self.seconds,
            });
        }
        if self.hours > 0 {
            Ok(format!(
                "{}:{:02}:{:02}",
                self.hours, self.minutes, self.seconds
            ))
        } else {
            Ok(format!("{}:{:02}", self.minutes, self.seconds))
        }
    }
}

/// Clamps `seconds` into `[0, total]` and converts the result back.
pub fn clamp_to(seconds: i64, total: i64) -> Duration {
    let clamped = seconds.min(total).max(0);
    Duration::from_seconds(u64::try_from(clamped).unwrap_or(0))
}
