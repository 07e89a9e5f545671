use std::{
    fmt::Display,
    ops::{Add, Sub},
};

use chrono::Duration;
use serde::{Serialize, Serializer};

const SECS_IN_MIN: i64 = 60;
const MINS_IN_HOUR: i64 = 60;

/// The pattern of the timestamps in a call log, e.g. `13-01-2020 18:10:15`.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// A local, wall-clock date time of a call log.
pub type Timestamp = chrono::NaiveDateTime;

const TIMESTAMP_LEN: usize = 19;
const TIMESTAMP_SEPARATORS: [(usize, u8); 5] =
    [(2, b'-'), (5, b'-'), (10, b' '), (13, b':'), (16, b':')];

/// Parse a log timestamp. Every field must be zero-padded; chrono alone also accepts single
/// digits, signed years and a missing or repeated space.
pub(crate) fn parse_timestamp(value: &str) -> Option<Timestamp> {
    if !has_timestamp_shape(value) {
        return None;
    }

    Timestamp::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

fn has_timestamp_shape(value: &str) -> bool {
    let bytes = value.as_bytes();

    bytes.len() == TIMESTAMP_LEN
        && bytes.iter().enumerate().all(|(index, byte)| {
            match TIMESTAMP_SEPARATORS.iter().find(|(at, _)| *at == index) {
                Some((_, separator)) => byte == separator,
                None => byte.is_ascii_digit(),
            }
        })
}

/// A non-negative duration that serializes to an integer amount of seconds.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct CallDuration(Duration);

impl CallDuration {
    pub(crate) fn zero() -> Self {
        Self(Duration::zero())
    }

    /// The whole number of seconds in this duration.
    #[must_use]
    pub fn num_seconds(&self) -> i64 {
        self.0.num_seconds()
    }

    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(
            self.0
                .checked_sub(&other.0)
                .filter(|d| *d > Duration::zero())
                .unwrap_or_else(Duration::zero),
        )
    }

    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(
            self.0
                .checked_add(&other.0)
                .unwrap_or(Duration::MAX),
        )
    }
}

impl From<Duration> for CallDuration {
    /// Negative durations are clamped to zero.
    fn from(value: Duration) -> Self {
        Self(value.max(Duration::zero()))
    }
}

impl Default for CallDuration {
    fn default() -> Self {
        Self::zero()
    }
}

impl Serialize for CallDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0.num_seconds())
    }
}

impl Display for CallDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let duration = self.0;
        let seconds = duration.num_seconds() % SECS_IN_MIN;
        let minutes = (duration.num_seconds() / SECS_IN_MIN) % MINS_IN_HOUR;
        let hours = duration.num_seconds() / (SECS_IN_MIN * MINS_IN_HOUR);

        write!(f, "{hours:0>2}:{minutes:0>2}:{seconds:0>2}")
    }
}

/// An amount of started minutes. Any remainder of seconds counts as a whole minute.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default, Serialize)]
#[serde(transparent)]
pub struct BillableMinutes(i64);

impl BillableMinutes {
    /// Round the given amount of seconds up to whole minutes.
    pub(crate) fn from_seconds(seconds: i64) -> Self {
        let seconds = seconds.max(0);
        let minutes = seconds / SECS_IN_MIN + i64::from(seconds % SECS_IN_MIN != 0);

        Self(minutes)
    }

    pub(crate) const fn new(minutes: i64) -> Self {
        Self(minutes)
    }

    /// The number of minutes.
    #[must_use]
    pub fn count(self) -> i64 {
        self.0
    }
}

impl From<CallDuration> for BillableMinutes {
    fn from(value: CallDuration) -> Self {
        Self::from_seconds(value.num_seconds())
    }
}

impl Add for BillableMinutes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for BillableMinutes {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Display for BillableMinutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
