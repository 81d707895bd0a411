//! FMEA ratings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A severity, occurrence or detectability score, always within
/// `Rating::MIN..=Rating::MAX`.
///
/// External input is clamped on the way in, never rejected. This holds for
/// deserialization too: a persisted `42` loads as `10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Clamp an arbitrary integer into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Get the raw score.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<i64> for Rating {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Risk priority number: severity × occurrence × detectability.
pub fn rpn(severity: Rating, occurrence: Rating, detectability: Rating) -> u32 {
    u32::from(severity.get()) * u32::from(occurrence.get()) * u32::from(detectability.get())
}
