//! Upload age threshold
//!
//! An [`AgeSpec`] such as `7d` or `72h` is turned into a fixed [`Cutoff`]
//! instant once per run. Every upload in that run is classified against
//! the same cutoff.

use std::fmt;
use std::str::FromStr;

use jiff::{SignedDuration, Timestamp};

use crate::error::{Error, Result};

const SECONDS_PER_HOUR: i64 = 60 * 60;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Unit of an age threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeUnit {
    Days,
    Hours,
}

impl AgeUnit {
    fn suffix(self) -> char {
        match self {
            AgeUnit::Days => 'd',
            AgeUnit::Hours => 'h',
        }
    }

    fn seconds(self) -> i64 {
        match self {
            AgeUnit::Days => SECONDS_PER_DAY,
            AgeUnit::Hours => SECONDS_PER_HOUR,
        }
    }
}

/// Parsed `<positive integer><d|h>` threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeSpec {
    pub amount: u64,
    pub unit: AgeUnit,
}

impl AgeSpec {
    /// Parse an age threshold such as `7d` or `72h`
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || {
            Error::Config(format!(
                "Invalid age '{input}': expected a positive number followed by 'd' (days) or 'h' (hours), e.g. '7d' or '72h'"
            ))
        };

        let (digits, unit) = match input.char_indices().last() {
            Some((idx, 'd')) => (&input[..idx], AgeUnit::Days),
            Some((idx, 'h')) => (&input[..idx], AgeUnit::Hours),
            _ => return Err(invalid()),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let amount: u64 = digits.parse().map_err(|_| invalid())?;
        if amount == 0 {
            return Err(invalid());
        }

        Ok(Self { amount, unit })
    }

    /// Total length of the threshold
    pub fn duration(&self) -> Result<SignedDuration> {
        i64::try_from(self.amount)
            .ok()
            .and_then(|n| n.checked_mul(self.unit.seconds()))
            .map(SignedDuration::from_secs)
            .ok_or_else(|| Error::Config(format!("Age '{self}' is too large")))
    }

    /// Compute the cutoff instant relative to `now`
    pub fn cutoff(&self, now: Timestamp) -> Result<Cutoff> {
        let instant = now
            .checked_sub(self.duration()?)
            .map_err(|_| Error::Config(format!("Age '{self}' is too large")))?;
        Ok(Cutoff(instant))
    }
}

impl FromStr for AgeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AgeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Fixed instant separating stale uploads from recent ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cutoff(Timestamp);

impl Cutoff {
    pub fn at(instant: Timestamp) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> Timestamp {
        self.0
    }

    /// An upload is eligible only when it started strictly before the cutoff.
    pub fn is_eligible(&self, started_at: Timestamp) -> bool {
        started_at < self.0
    }
}
