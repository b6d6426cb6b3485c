// 🎚️ Filter Criteria - leading-digit attribute filters
// Digit set, magnitude class and parity class; all three must pass

use crate::code::Code;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// MAGNITUDE & PARITY
// ============================================================================

/// Large = leading digit 5-9, Small = 0-4. No digit belongs to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Magnitude {
    Large,
    Small,
}

impl Magnitude {
    pub const ALL: [Magnitude; 2] = [Magnitude::Large, Magnitude::Small];

    pub fn of_digit(digit: u8) -> Self {
        if digit >= 5 {
            Magnitude::Large
        } else {
            Magnitude::Small
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::Large => f.write_str("large"),
            Magnitude::Small => f.write_str("small"),
        }
    }
}

impl FromStr for Magnitude {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "large" | "big" | "大" => Ok(Magnitude::Large),
            "small" | "小" => Ok(Magnitude::Small),
            other => Err(Error::InvalidFilter(other.to_string())),
        }
    }
}

/// Parity of the leading digit only, not of the whole code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub const ALL: [Parity; 2] = [Parity::Odd, Parity::Even];

    pub fn of_digit(digit: u8) -> Self {
        if digit % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Odd => f.write_str("odd"),
            Parity::Even => f.write_str("even"),
        }
    }
}

impl FromStr for Parity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "odd" | "单" => Ok(Parity::Odd),
            "even" | "双" => Ok(Parity::Even),
            other => Err(Error::InvalidFilter(other.to_string())),
        }
    }
}

// ============================================================================
// FILTER CRITERIA
// ============================================================================

/// Transient filter configuration, rebuilt from user input on every evaluation.
/// An empty set is legal and lets nothing through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Allowed leading digits (0-9)
    #[serde(default = "all_digits")]
    pub digits: BTreeSet<u8>,

    /// Allowed magnitude classes
    #[serde(default = "all_magnitudes")]
    pub magnitudes: BTreeSet<Magnitude>,

    /// Allowed parity classes
    #[serde(default = "all_parities")]
    pub parities: BTreeSet<Parity>,
}

fn all_digits() -> BTreeSet<u8> {
    (0..=9).collect()
}

fn all_magnitudes() -> BTreeSet<Magnitude> {
    Magnitude::ALL.into_iter().collect()
}

fn all_parities() -> BTreeSet<Parity> {
    Parity::ALL.into_iter().collect()
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            digits: all_digits(),
            magnitudes: all_magnitudes(),
            parities: all_parities(),
        }
    }
}

impl FilterCriteria {
    /// Conjunctive check on the leading digit
    pub fn matches(&self, code: &Code) -> bool {
        self.digits.contains(&code.leading_digit())
            && self.magnitudes.contains(&code.magnitude())
            && self.parities.contains(&code.parity())
    }

    pub fn with_digits(mut self, digits: impl IntoIterator<Item = u8>) -> Self {
        self.digits = digits.into_iter().filter(|d| *d <= 9).collect();
        self
    }

    pub fn with_magnitudes(mut self, magnitudes: impl IntoIterator<Item = Magnitude>) -> Self {
        self.magnitudes = magnitudes.into_iter().collect();
        self
    }

    pub fn with_parities(mut self, parities: impl IntoIterator<Item = Parity>) -> Self {
        self.parities = parities.into_iter().collect();
        self
    }

    /// Ignores anything outside 0-9
    pub fn toggle_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        if !self.digits.remove(&digit) {
            self.digits.insert(digit);
        }
    }

    pub fn toggle_magnitude(&mut self, magnitude: Magnitude) {
        if !self.magnitudes.remove(&magnitude) {
            self.magnitudes.insert(magnitude);
        }
    }

    pub fn toggle_parity(&mut self, parity: Parity) {
        if !self.parities.remove(&parity) {
            self.parities.insert(parity);
        }
    }
}

// ============================================================================
// PARSING HELPERS (CLI flags and query strings)
// ============================================================================

/// Parse "0,3,7" (or "037") into a digit set. Empty input means no digits.
pub fn parse_digit_list(input: &str) -> Result<BTreeSet<u8>> {
    let mut digits = BTreeSet::new();
    for ch in input.chars() {
        match ch {
            '0'..='9' => {
                digits.insert(ch as u8 - b'0');
            }
            ',' | ' ' => {}
            _ => return Err(Error::InvalidFilter(input.to_string())),
        }
    }
    Ok(digits)
}

/// Parse a comma-separated list of magnitude or parity names
pub fn parse_name_list<T>(input: &str) -> Result<BTreeSet<T>>
where
    T: FromStr<Err = Error> + Ord,
{
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse::<T>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> Code {
        Code::parse(s).unwrap()
    }

    #[test]
    fn test_defaults_allow_everything() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.digits.len(), 10);
        assert!(criteria.matches(&code("50000")));
        assert!(criteria.matches(&code("49999")));
        assert!(criteria.matches(&code("00000")));
    }

    #[test]
    fn test_magnitude_boundary() {
        assert_eq!(Magnitude::of_digit(4), Magnitude::Small);
        assert_eq!(Magnitude::of_digit(5), Magnitude::Large);
        assert_eq!(Magnitude::of_digit(0), Magnitude::Small);
        assert_eq!(Magnitude::of_digit(9), Magnitude::Large);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let criteria = FilterCriteria::default()
            .with_digits([4, 5, 6])
            .with_magnitudes([Magnitude::Large])
            .with_parities([Parity::Even]);

        // 6: allowed digit, large, even
        assert!(criteria.matches(&code("60000")));
        // 5: large but odd
        assert!(!criteria.matches(&code("50000")));
        // 4: even but small
        assert!(!criteria.matches(&code("40000")));
        // 8: large and even but not in the digit set
        assert!(!criteria.matches(&code("80000")));
    }

    #[test]
    fn test_empty_set_blocks_all() {
        let criteria = FilterCriteria::default().with_parities([]);
        assert!(!criteria.matches(&code("12345")));
        assert!(!criteria.matches(&code("23456")));
    }

    #[test]
    fn test_toggles() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_digit(3);
        assert!(!criteria.digits.contains(&3));
        criteria.toggle_digit(3);
        assert!(criteria.digits.contains(&3));
        criteria.toggle_digit(12);
        assert_eq!(criteria.digits.len(), 10);

        criteria.toggle_magnitude(Magnitude::Small);
        assert!(!criteria.matches(&code("30000")));
        criteria.toggle_parity(Parity::Odd);
        assert!(!criteria.matches(&code("70000")));
        assert!(criteria.matches(&code("80000")));
    }

    #[test]
    fn test_parse_digit_list() {
        let digits = parse_digit_list("0, 3,7").unwrap();
        assert_eq!(digits.into_iter().collect::<Vec<_>>(), vec![0, 3, 7]);
        assert_eq!(parse_digit_list("59").unwrap().len(), 2);
        assert!(parse_digit_list("").unwrap().is_empty());
        assert!(parse_digit_list("1,x").is_err());
    }

    #[test]
    fn test_parse_name_lists() {
        let magnitudes: BTreeSet<Magnitude> = parse_name_list("Large, small").unwrap();
        assert_eq!(magnitudes.len(), 2);
        let parities: BTreeSet<Parity> = parse_name_list("双").unwrap();
        assert!(parities.contains(&Parity::Even));
        assert!(parse_name_list::<Parity>("odd,weird").is_err());
    }

    #[test]
    fn test_criteria_json_defaults() {
        let criteria: FilterCriteria = serde_json::from_str(r#"{"digits":[1,2]}"#).unwrap();
        assert_eq!(criteria.digits.len(), 2);
        assert_eq!(criteria.magnitudes.len(), 2);
        assert_eq!(criteria.parities.len(), 2);

        let json = serde_json::to_string(&FilterCriteria::default()).unwrap();
        assert!(json.contains("\"large\""));
    }
}
