//! Variance of a tensor index.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TensorError;

/// Transformation behavior of one index position.
///
/// `Contravariant` indices are vector-like (written up, `T^a`), `Covariant`
/// indices are covector-like (written down, `T_a`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexType {
    Covariant,
    Contravariant,
}

impl IndexType {
    /// Synonym for [`IndexType::Contravariant`].
    pub const UP: IndexType = IndexType::Contravariant;

    /// Synonym for [`IndexType::Covariant`].
    pub const DOWN: IndexType = IndexType::Covariant;

    /// `+1` for contravariant, `-1` for covariant.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            IndexType::Covariant => -1,
            IndexType::Contravariant => 1,
        }
    }

    /// The opposite variance.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            IndexType::Covariant => IndexType::Contravariant,
            IndexType::Contravariant => IndexType::Covariant,
        }
    }

    /// Parse a single index-type character.
    ///
    /// `u`, `U` and `^` are contravariant; `d`, `D` and `_` are covariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointtensor::IndexType;
    ///
    /// assert_eq!(IndexType::from_char('u').unwrap(), IndexType::UP);
    /// assert_eq!(IndexType::from_char('_').unwrap(), IndexType::DOWN);
    /// assert!(IndexType::from_char('x').is_err());
    /// ```
    pub fn from_char(token: char) -> Result<Self, TensorError> {
        match token {
            'u' | 'U' | '^' => Ok(IndexType::Contravariant),
            'd' | 'D' | '_' => Ok(IndexType::Covariant),
            _ => Err(TensorError::InvalidIndexType { token }),
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexType::Covariant => f.write_str("d"),
            IndexType::Contravariant => f.write_str("u"),
        }
    }
}

/// Parse a string of index-type characters into a type sequence.
///
/// Whitespace is ignored, so `"u d d"` and `"udd"` are equivalent. The empty
/// string describes a scalar.
///
/// # Examples
///
/// ```
/// use pointtensor::{IndexType, parse_index_types};
///
/// let types = parse_index_types("udd").unwrap();
/// assert_eq!(types, vec![IndexType::UP, IndexType::DOWN, IndexType::DOWN]);
/// ```
pub fn parse_index_types(text: &str) -> Result<Vec<IndexType>, TensorError> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(IndexType::from_char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms() {
        assert_eq!(IndexType::UP, IndexType::Contravariant);
        assert_eq!(IndexType::DOWN, IndexType::Covariant);
        assert_eq!(IndexType::UP.sign(), 1);
        assert_eq!(IndexType::DOWN.sign(), -1);
    }

    #[test]
    fn test_flip() {
        assert_eq!(IndexType::UP.flip(), IndexType::DOWN);
        assert_eq!(IndexType::DOWN.flip(), IndexType::UP);
    }

    #[test]
    fn test_parse_index_types() {
        assert_eq!(parse_index_types("").unwrap(), vec![]);
        assert_eq!(
            parse_index_types("^ _").unwrap(),
            vec![IndexType::UP, IndexType::DOWN]
        );
        assert_eq!(
            parse_index_types("uDx"),
            Err(TensorError::InvalidIndexType { token: 'x' })
        );
    }

    #[test]
    fn test_display() {
        let s: String = [IndexType::UP, IndexType::DOWN]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(s, "ud");
    }
}
