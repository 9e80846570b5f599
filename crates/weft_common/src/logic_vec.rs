//! Packed vectors of 4-state logic values.
//!
//! Constant devices and constant expressions store their value as a
//! [`LogicVec`]; bit 0 is the least significant bit.

use crate::logic::Logic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A vector of 4-state [`Logic`] values, two bits per value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicVec {
    width: u32,
    /// 32 values per word, value `i` at bits `2*(i%32)..`.
    data: Vec<u64>,
}

const VALUES_PER_WORD: u32 = 32;

impl LogicVec {
    /// An all-zero vector `width` bits wide.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            data: vec![0; word_count(width)],
        }
    }

    /// A vector `width` bits wide with every bit `value`.
    pub fn filled(value: Logic, width: u32) -> Self {
        let mut v = Self::new(width);
        for i in 0..width {
            v.set(i, value);
        }
        v
    }

    /// Number of bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The value of bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn get(&self, index: u32) -> Logic {
        let (word, shift) = self.locate(index);
        match (self.data[word] >> shift) & 0b11 {
            0 => Logic::Zero,
            1 => Logic::One,
            2 => Logic::X,
            _ => Logic::Z,
        }
    }

    /// Overwrites bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.width()`.
    pub fn set(&mut self, index: u32, value: Logic) {
        let (word, shift) = self.locate(index);
        let cleared = self.data[word] & !(0b11u64 << shift);
        self.data[word] = cleared | ((value as u64) << shift);
    }

    fn locate(&self, index: u32) -> (usize, u32) {
        if index >= self.width {
            panic!("bit {index} of a {}-bit vector", self.width);
        }
        (
            (index / VALUES_PER_WORD) as usize,
            (index % VALUES_PER_WORD) * 2,
        )
    }

    /// Creates a vector from the low `width` bits of `value`.
    pub fn from_u64(value: u64, width: u32) -> Self {
        let mut v = Self::new(width);
        for i in 0..width.min(64) {
            if (value >> i) & 1 != 0 {
                v.set(i, Logic::One);
            }
        }
        v
    }

    /// Converts to a `u64` if every bit is defined and the width fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.width > 64 {
            return None;
        }
        let mut result = 0u64;
        for i in 0..self.width {
            match self.get(i) {
                Logic::Zero => {}
                Logic::One => result |= 1 << i,
                Logic::X | Logic::Z => return None,
            }
        }
        Some(result)
    }

    /// Returns `true` if every bit is `0`. An empty vector counts as zero.
    pub fn is_all_zero(&self) -> bool {
        (0..self.width).all(|i| self.get(i) == Logic::Zero)
    }

    /// Returns `true` if no bit is `X` or `Z`.
    pub fn is_defined(&self) -> bool {
        (0..self.width).all(|i| self.get(i).is_defined())
    }

    /// Parses a binary string such as `"10xz"`, most significant bit first.
    pub fn from_binary_str(s: &str) -> Option<Self> {
        let mut v = Self::new(s.len() as u32);
        for (i, c) in s.chars().rev().enumerate() {
            v.set(i as u32, Logic::from_char(c)?);
        }
        Some(v)
    }
}

impl fmt::Display for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.width).rev() {
            write!(f, "{}", self.get(i))?;
        }
        Ok(())
    }
}

impl fmt::Debug for LogicVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogicVec({}'b{self})", self.width)
    }
}

fn word_count(width: u32) -> usize {
    width.div_ceil(VALUES_PER_WORD) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_roundtrip() {
        let mut v = LogicVec::new(4);
        v.set(1, Logic::One);
        v.set(2, Logic::X);
        v.set(3, Logic::Z);
        assert_eq!(v.get(0), Logic::Zero);
        assert_eq!(v.get(1), Logic::One);
        assert_eq!(v.get(2), Logic::X);
        assert_eq!(v.get(3), Logic::Z);
    }

    #[test]
    fn from_binary_str_msb_first() {
        let v = LogicVec::from_binary_str("10XZ").unwrap();
        assert_eq!(v.width(), 4);
        assert_eq!(v.get(3), Logic::One);
        assert_eq!(v.get(0), Logic::Z);
        assert!(LogicVec::from_binary_str("10A1").is_none());
    }

    #[test]
    fn u64_conversion() {
        let v = LogicVec::from_u64(0b1011, 4);
        assert_eq!(format!("{v}"), "1011");
        assert_eq!(v.to_u64(), Some(11));
        assert_eq!(LogicVec::filled(Logic::X, 2).to_u64(), None);
    }

    #[test]
    fn zero_and_defined() {
        assert!(LogicVec::new(8).is_all_zero());
        assert!(LogicVec::new(0).is_all_zero());
        assert!(!LogicVec::from_u64(4, 8).is_all_zero());
        assert!(LogicVec::from_u64(4, 8).is_defined());
        assert!(!LogicVec::from_binary_str("0z").unwrap().is_defined());
    }

    #[test]
    fn spans_multiple_words() {
        let mut v = LogicVec::new(100);
        v.set(50, Logic::X);
        v.set(99, Logic::One);
        assert_eq!(v.get(50), Logic::X);
        assert_eq!(v.get(99), Logic::One);
        assert_eq!(v.get(98), Logic::Zero);
    }

    #[test]
    fn debug_shows_width() {
        let v = LogicVec::from_binary_str("01").unwrap();
        assert_eq!(format!("{v:?}"), "LogicVec(2'b01)");
    }

    #[test]
    fn serde_roundtrip() {
        let v = LogicVec::from_binary_str("10XZ1010").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        let back: LogicVec = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
