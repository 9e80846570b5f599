//! Single 4-state logic values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 4-state logic value: `0`, `1`, unknown `X`, or high-impedance `Z`.
///
/// Pins carry one of these as their initial value; a register-like signal
/// starts at `X`, an undriven net floats at `Z`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Logic low.
    Zero = 0,
    /// Logic high.
    One = 1,
    /// Unknown.
    X = 2,
    /// High-impedance.
    Z = 3,
}

impl Logic {
    /// Converts a character to a [`Logic`] value.
    ///
    /// Accepts '0', '1', 'x'/'X', and 'z'/'Z'.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns `true` for `0` and `1`.
    pub fn is_defined(self) -> bool {
        matches!(self, Logic::Zero | Logic::One)
    }

    /// Returns the lowercase character used in netlist dumps.
    pub fn to_char(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::Zero => write!(f, "0"),
            Logic::One => write!(f, "1"),
            Logic::X => write!(f, "X"),
            Logic::Z => write!(f, "Z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Logic::{self, *};

    #[test]
    fn display() {
        assert_eq!(format!("{Zero}"), "0");
        assert_eq!(format!("{One}"), "1");
        assert_eq!(format!("{X}"), "X");
        assert_eq!(format!("{Z}"), "Z");
    }

    #[test]
    fn from_char_accepts_both_cases() {
        assert_eq!(Logic::from_char('0'), Some(Zero));
        assert_eq!(Logic::from_char('1'), Some(One));
        assert_eq!(Logic::from_char('x'), Some(X));
        assert_eq!(Logic::from_char('Z'), Some(Z));
        assert_eq!(Logic::from_char('2'), None);
    }

    #[test]
    fn defined_values() {
        assert!(Zero.is_defined());
        assert!(One.is_defined());
        assert!(!X.is_defined());
        assert!(!Z.is_defined());
    }

    #[test]
    fn dump_chars_are_lowercase() {
        let chars: String = [Zero, One, X, Z].iter().map(|v| v.to_char()).collect();
        assert_eq!(chars, "01xz");
    }
}
