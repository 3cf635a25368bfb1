//! Abstract index labels for the Einstein summation convention.
//!
//! A label is a single character attached to an index position. Two
//! positions carrying the same non-free label are summed over. The sentinel
//! characters `'\0'`, `'0'`, `'.'` and `'-'` mark a position as free and are
//! never contracted, however often they repeat.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Characters that mark a position as free.
const FREE_TOKENS: [char; 4] = ['\0', '0', '.', '-'];

/// Label attached to one index position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Label(char);

impl Label {
    /// The default, unlabeled state.
    pub const FREE: Label = Label('\0');

    /// Create a label from a character.
    #[inline]
    pub const fn new(token: char) -> Self {
        Label(token)
    }

    /// The underlying character.
    #[inline]
    pub fn token(self) -> char {
        self.0
    }

    /// Whether this label is one of the free sentinels.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointtensor::Label;
    ///
    /// assert!(Label::FREE.is_free());
    /// assert!(Label::new('.').is_free());
    /// assert!(!Label::new('a').is_free());
    /// ```
    #[inline]
    pub fn is_free(self) -> bool {
        FREE_TOKENS.contains(&self.0)
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::FREE
    }
}

impl From<char> for Label {
    fn from(token: char) -> Self {
        Label(token)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            f.write_str(".")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Argument of the labelling operation.
///
/// Either clears every label or assigns exactly one token per index
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSpec<'a> {
    /// Reset all positions to [`Label::FREE`].
    Clear,
    /// One token per index position, in order.
    Tokens(&'a [char]),
}

impl<'a> From<&'a [char]> for LabelSpec<'a> {
    fn from(tokens: &'a [char]) -> Self {
        LabelSpec::Tokens(tokens)
    }
}

impl<'a, const N: usize> From<&'a [char; N]> for LabelSpec<'a> {
    fn from(tokens: &'a [char; N]) -> Self {
        LabelSpec::Tokens(tokens)
    }
}

/// Positions of each non-free label, in order of first appearance.
pub(crate) fn label_positions(labels: &[Label]) -> Vec<(Label, Vec<usize>)> {
    let mut groups: Vec<(Label, Vec<usize>)> = Vec::new();
    for (pos, &label) in labels.iter().enumerate() {
        if label.is_free() {
            continue;
        }
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, positions)) => positions.push(pos),
            None => groups.push((label, vec![pos])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_sentinels() {
        for c in ['\0', '0', '.', '-'] {
            assert!(Label::new(c).is_free());
        }
        assert!(!Label::new('a').is_free());
        assert!(!Label::new('1').is_free());
        assert_eq!(Label::default(), Label::FREE);
    }

    #[test]
    fn test_display() {
        assert_eq!(Label::new('m').to_string(), "m");
        assert_eq!(Label::new('-').to_string(), ".");
    }

    #[test]
    fn test_label_positions() {
        let labels: Vec<Label> = ['a', '.', 'b', 'a', '.', 'c']
            .iter()
            .map(|&c| Label::new(c))
            .collect();
        let groups = label_positions(&labels);
        assert_eq!(
            groups,
            vec![
                (Label::new('a'), vec![0, 3]),
                (Label::new('b'), vec![2]),
                (Label::new('c'), vec![5]),
            ]
        );
    }

    #[test]
    fn test_label_spec_from() {
        let spec: LabelSpec = (&['a', 'b']).into();
        assert_eq!(spec, LabelSpec::Tokens(&['a', 'b']));
    }
}
