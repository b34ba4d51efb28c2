//! Track and playlist durations.
//!
//! A [`TrackDuration`] is stored as a count of whole seconds, so summing
//! durations never has to carry seconds into minutes or minutes into hours.
//! Hours are unbounded: a playlist longer than a day reports `24:00:00` and
//! beyond instead of wrapping around.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackDuration {
    secs: u64,
}

impl TrackDuration {
    pub const fn zero() -> Self {
        Self { secs: 0 }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Builds a duration from independent components.
    ///
    /// Components are not required to be normalized: `from_hms(0, 90, 0)`
    /// is the same as `from_hms(1, 30, 0)`.
    pub const fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self {
            secs: hours
                .saturating_mul(SECS_PER_HOUR)
                .saturating_add(minutes.saturating_mul(SECS_PER_MINUTE))
                .saturating_add(seconds),
        }
    }

    pub const fn as_secs(&self) -> u64 {
        self.secs
    }

    pub const fn hours(&self) -> u64 {
        self.secs / SECS_PER_HOUR
    }

    pub const fn minutes(&self) -> u64 {
        (self.secs % SECS_PER_HOUR) / SECS_PER_MINUTE
    }

    pub const fn seconds(&self) -> u64 {
        self.secs % SECS_PER_MINUTE
    }

    pub const fn is_zero(&self) -> bool {
        self.secs == 0
    }
}

impl Add for TrackDuration {
    type Output = TrackDuration;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            secs: self.secs.saturating_add(rhs.secs),
        }
    }
}

impl Sum for TrackDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a TrackDuration> for TrackDuration {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Total duration of an ordered sequence of durations.
///
/// Empty input yields [`TrackDuration::zero`]. The result does not depend on
/// the order of the input.
pub fn aggregate<I>(durations: I) -> TrackDuration
where
    I: IntoIterator<Item = TrackDuration>,
{
    durations.into_iter().sum()
}

impl fmt::Display for TrackDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDurationError {
    #[error("expected H:MM:SS or MM:SS, got '{0}'")]
    Format(String),

    #[error("invalid number '{0}' in duration")]
    Number(String),

    #[error("{component} must be below 60, got {value}")]
    OutOfRange { component: &'static str, value: u64 },
}

impl FromStr for TrackDuration {
    type Err = ParseDurationError;

    /// Accepts `H:MM:SS` (hours unbounded) or `MM:SS`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts = raw
            .trim()
            .split(':')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| ParseDurationError::Number(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (hours, minutes, seconds) = match parts.as_slice() {
            [h, m, s] => (*h, *m, *s),
            [m, s] => (0, *m, *s),
            _ => return Err(ParseDurationError::Format(raw.to_string())),
        };

        if minutes >= 60 {
            return Err(ParseDurationError::OutOfRange {
                component: "minutes",
                value: minutes,
            });
        }
        if seconds >= 60 {
            return Err(ParseDurationError::OutOfRange {
                component: "seconds",
                value: seconds,
            });
        }

        Ok(Self::from_hms(hours, minutes, seconds))
    }
}

impl Serialize for TrackDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TrackDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
