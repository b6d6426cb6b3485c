// 🔢 Code - the 5-digit unit of recommendation
// Value type plus the sequential-run detector used by the pipeline

use crate::filter::{Magnitude, Parity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of digits in every code
pub const CODE_WIDTH: usize = 5;

/// Width of the sliding window checked for sequential runs
const WINDOW: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a 5-digit code")]
pub struct ParseCodeError(pub String);

// ============================================================================
// CODE
// ============================================================================

/// Exactly five ASCII digits, left-zero-padded.
/// Equal strings are equal codes; pool identity is positional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// Normalize a raw pool token: trim, left-pad with '0' to width 5, validate.
    ///
    /// "1" and "00001" both normalize to "00001"; the collision is kept as is.
    pub fn normalize(raw: &str) -> Result<Self, ParseCodeError> {
        let token = raw.trim();
        if token.is_empty() || token.len() > CODE_WIDTH {
            return Err(ParseCodeError(raw.to_string()));
        }
        Self::parse(&format!("{:0>width$}", token, width = CODE_WIDTH))
    }

    /// Strict parse: exactly five ASCII digits, no padding applied
    pub fn parse(s: &str) -> Result<Self, ParseCodeError> {
        if s.len() == CODE_WIDTH && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Code(s.to_string()))
        } else {
            Err(ParseCodeError(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading digit as a number (0-9)
    pub fn leading_digit(&self) -> u8 {
        self.0.as_bytes()[0] - b'0'
    }

    pub fn magnitude(&self) -> Magnitude {
        Magnitude::of_digit(self.leading_digit())
    }

    pub fn parity(&self) -> Parity {
        Parity::of_digit(self.leading_digit())
    }

    /// The three overlapping windows [0:3), [1:4), [2:5)
    pub fn windows(&self) -> impl Iterator<Item = &str> + '_ {
        (0..=CODE_WIDTH - WINDOW).map(move |start| &self.0[start..start + WINDOW])
    }

    /// True if any window is an ascending or descending run of consecutive digits
    pub fn is_sequential_tainted(&self) -> bool {
        self.windows().any(is_sequential_run)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Code::parse(s)
    }
}

impl TryFrom<String> for Code {
    type Error = ParseCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Code::parse(&value)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SEQUENTIAL-RUN DETECTOR
// ============================================================================

/// Three digits stepping by exactly +1 twice ("345") or -1 twice ("543").
/// Anything that is not exactly three ASCII digits is not a run.
pub fn is_sequential_run(window: &str) -> bool {
    let (a, b, c) = match window.as_bytes() {
        &[a, b, c] if [a, b, c].iter().all(u8::is_ascii_digit) => {
            (i16::from(a), i16::from(b), i16::from(c))
        }
        _ => return false,
    };

    let (first, second) = (b - a, c - b);
    (first == 1 && second == 1) || (first == -1 && second == -1)
}
