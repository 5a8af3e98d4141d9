use std::{fmt::Display, str::FromStr};

use thiserror::Error;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BitsError {
    #[error("bit {index} is out of range for a bitmap of {len} bits")]
    OutOfRange { index: usize, len: usize },
    #[error("cannot allocate a bitmap of {requested} bits")]
    TooLarge { requested: u128 },
    #[error("invalid character {found:?} at position {index}, expected '0' or '1'")]
    InvalidChar { index: usize, found: char },
}

/// Fixed length bit vector packed into 64 bit words.
///
/// The text form is one `'0'` or `'1'` per bit, bit 0 first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitMap {
    words: Vec<u64>,
    len: usize,
}

impl BitMap {
    pub fn new(len: usize) -> Result<Self, BitsError> {
        let count = len.div_ceil(WORD_BITS);
        let mut words = Vec::new();
        words
            .try_reserve_exact(count)
            .map_err(|_| BitsError::TooLarge {
                requested: len as u128,
            })?;
        words.resize(count, 0);
        Ok(Self { words, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check(&self, index: usize) -> Result<(usize, u64), BitsError> {
        if index >= self.len {
            return Err(BitsError::OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok((index / WORD_BITS, 1 << (index % WORD_BITS)))
    }

    pub fn is_set(&self, index: usize) -> Result<bool, BitsError> {
        let (word, mask) = self.check(index)?;
        Ok(self.words[word] & mask != 0)
    }

    pub fn set_val(&mut self, index: usize, val: bool) -> Result<(), BitsError> {
        let (word, mask) = self.check(index)?;
        if val {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
        Ok(())
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.words[i / WORD_BITS] & (1 << (i % WORD_BITS)) != 0)
    }
}

impl Display for BitMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitMap {
    type Err = BitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut out = BitMap::new(s.chars().count())?;
        for (index, found) in s.chars().enumerate() {
            match found {
                '0' => {}
                '1' => out.set_val(index, true)?,
                _ => return Err(BitsError::InvalidChar { index, found }),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_set_across_words() -> Result<()> {
        let mut bits = BitMap::new(130)?;
        bits.set_val(0, true)?;
        bits.set_val(64, true)?;
        bits.set_val(129, true)?;
        assert!(bits.is_set(64)?);
        assert!(!bits.is_set(63)?);
        assert_eq!(bits.count_ones(), 3);
        bits.set_val(64, false)?;
        assert_eq!(bits.count_ones(), 2);
        Ok(())
    }

    #[test]
    fn test_out_of_range() -> Result<()> {
        let mut bits = BitMap::new(10)?;
        assert_eq!(
            bits.is_set(10),
            Err(BitsError::OutOfRange { index: 10, len: 10 })
        );
        assert!(bits.set_val(11, true).is_err());
        Ok(())
    }

    #[test]
    fn test_text() -> Result<()> {
        let bits: BitMap = "0100110".parse()?;
        assert_eq!(bits.len(), 7);
        assert_eq!(bits.count_ones(), 3);
        assert!(bits.is_set(1)?);
        assert_eq!(bits.to_string(), "0100110");

        let err = "01x".parse::<BitMap>().unwrap_err();
        assert_eq!(err, BitsError::InvalidChar { index: 2, found: 'x' });
        Ok(())
    }

    #[test]
    fn test_clone_is_independent() -> Result<()> {
        let mut orig = BitMap::new(8)?;
        let copy = orig.clone();
        orig.set_val(3, true)?;
        assert!(!copy.is_set(3)?);
        Ok(())
    }
}
