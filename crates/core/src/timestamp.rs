// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compact timestamps: a UTC instant with every non-digit character
//! stripped, used in candidate/moduli filenames and as the stored
//! `timestamp` column.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("compact timestamp {0:?} is not strictly digits")]
    NotDigits(String),
    #[error("compact timestamp {0:?} does not parse as a UTC instant")]
    Unparseable(String),
}

/// A UTC instant rendered as an all-digits string:
/// `YYYYMMDDHHMMSSffffff` (microsecond precision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompactTimestamp(DateTime<Utc>);

impl CompactTimestamp {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn instant(self) -> DateTime<Utc> {
        self.0
    }

    /// Strip every non-digit character from the instant's representation,
    /// producing the compact form used in filenames.
    pub fn compact(self) -> String {
        format!("{}", self.0.format("%Y%m%d%H%M%S%6f"))
    }

    /// Parse a strictly-digits-only compact timestamp back into an instant.
    /// Inverse of [`CompactTimestamp::compact`] up to microsecond precision.
    pub fn parse(s: &str) -> Result<Self, TimestampError> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(TimestampError::NotDigits(s.to_string()));
        }
        // YYYYMMDDHHMMSS + up to 6 fractional digits.
        if s.len() < 14 {
            return Err(TimestampError::Unparseable(s.to_string()));
        }
        let (whole, frac) = s.split_at(14);
        let micros: u32 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<6}");
            let truncated = &padded[..6.min(padded.len())];
            truncated.parse().map_err(|_| TimestampError::Unparseable(s.to_string()))?
        };
        let naive = NaiveDateTime::parse_from_str(whole, "%Y%m%d%H%M%S")
            .map_err(|_| TimestampError::Unparseable(s.to_string()))?;
        let with_micros = naive.and_utc() + chrono::Duration::microseconds(micros as i64);
        Ok(Self(with_micros))
    }
}

impl fmt::Display for CompactTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact())
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
