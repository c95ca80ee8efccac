use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How many generations below the paint root receive a border.
///
/// Always within `MIN..=MAX`; out-of-range values are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Depth(u32);

impl Depth {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;
    pub const DEFAULT: Depth = Depth(1);

    /// Clamps into the default bounds.
    pub fn clamped(value: i64) -> Self {
        Self::clamped_within(value, Self::MIN, Self::MAX)
    }

    /// Clamps into `min..=max`, itself restricted to the default bounds.
    pub fn clamped_within(value: i64, min: u32, max: u32) -> Self {
        let min = min.clamp(Self::MIN, Self::MAX);
        let max = max.clamp(min, Self::MAX);
        let clamped = value.clamp(i64::from(min), i64::from(max));
        // In range of u32 after clamping.
        Depth(clamped as u32)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DepthParseError {
    #[error("Invalid depth '{0}': expected an integer between 1 and 10")]
    NotANumber(String),
}

impl FromStr for Depth {
    type Err = DepthParseError;

    /// Accepts any integer and clamps it; rejects non-numeric input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| DepthParseError::NotANumber(trimmed.to_string()))?;
        Ok(Depth::clamped(value))
    }
}

impl TryFrom<i64> for Depth {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Depth(value as u32))
        } else {
            Err(format!(
                "depth {value} is outside {}..={}",
                Self::MIN,
                Self::MAX
            ))
        }
    }
}

impl From<Depth> for u32 {
    fn from(depth: Depth) -> Self {
        depth.0
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
