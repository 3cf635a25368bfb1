//! Error types for pointtensor.

use thiserror::Error;

use crate::index_type::IndexType;
use crate::label::Label;

/// Coarse classification of a [`TensorError`].
///
/// Every error is a deterministic usage violation; the kind lets callers
/// branch on the category without matching each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index value outside `[0, DIMENSION)`.
    Domain,
    /// Operands with incompatible rank or index types.
    RankMismatch,
    /// Labelling with a token count other than the rank.
    LabelCountMismatch,
    /// A positional or label-driven contraction that cannot be performed.
    InvalidContractionPair,
    /// Any other misuse (lengths, names, permutations).
    Usage,
}

/// Errors that can occur in tensor operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TensorError {
    /// Index value out of the fixed dimension range.
    #[error("index {index} at position {position} is outside the range 0..4")]
    DomainError { position: usize, index: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Flat offset past the end of storage.
    #[error("offset {offset} out of range for storage of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// Addition or subtraction of tensors with different index structure.
    #[error("rank mismatch: expected types {expected:?}, got {actual:?}")]
    RankMismatch {
        expected: Vec<IndexType>,
        actual: Vec<IndexType>,
    },

    /// Labelling with the wrong number of tokens.
    #[error("wrong number of labels: expected {expected}, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    /// Positional contraction over equal or out-of-range positions.
    #[error("cannot contract positions {index1} and {index2} of a rank {rank} tensor")]
    InvalidContractionPair {
        index1: usize,
        index2: usize,
        rank: usize,
    },

    /// Label-driven contraction that cannot be performed.
    #[error("cannot contract label {label}: {reason}")]
    InvalidLabelContraction { label: Label, reason: String },

    /// Bulk copy with a slice of the wrong length.
    #[error("component count mismatch: expected {expected}, got {actual}")]
    ComponentCountMismatch { expected: usize, actual: usize },

    /// Unknown character in an index-type string.
    #[error("invalid index type {token:?}, expected one of u, d, ^, _")]
    InvalidIndexType { token: char },

    /// Invalid permutation.
    #[error("invalid permutation {perm:?} for tensor of rank {rank}")]
    InvalidPermutation { perm: Vec<usize>, rank: usize },

    /// Label requested for alignment that the tensor does not carry.
    #[error("label {label} not found")]
    LabelNotFound { label: Label },

    /// No tensor registered under this name.
    #[error("no tensor named {name:?}")]
    UnknownTensor { name: String },

    /// A tensor is already registered under this name.
    #[error("tensor {name:?} already exists")]
    DuplicateTensor { name: String },
}

impl TensorError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TensorError::DomainError { .. } => ErrorKind::Domain,
            TensorError::RankMismatch { .. } => ErrorKind::RankMismatch,
            TensorError::LabelCountMismatch { .. } => ErrorKind::LabelCountMismatch,
            TensorError::InvalidContractionPair { .. }
            | TensorError::InvalidLabelContraction { .. } => ErrorKind::InvalidContractionPair,
            TensorError::WrongNumberOfIndices { .. }
            | TensorError::OffsetOutOfRange { .. }
            | TensorError::ComponentCountMismatch { .. }
            | TensorError::InvalidIndexType { .. }
            | TensorError::InvalidPermutation { .. }
            | TensorError::LabelNotFound { .. }
            | TensorError::UnknownTensor { .. }
            | TensorError::DuplicateTensor { .. } => ErrorKind::Usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let e = TensorError::DomainError {
            position: 1,
            index: 7,
        };
        assert_eq!(e.kind(), ErrorKind::Domain);

        let e = TensorError::InvalidLabelContraction {
            label: Label::new('a'),
            reason: "appears 3 times".to_string(),
        };
        assert_eq!(e.kind(), ErrorKind::InvalidContractionPair);

        let e = TensorError::UnknownTensor {
            name: "g".to_string(),
        };
        assert_eq!(e.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_display() {
        let e = TensorError::DomainError {
            position: 0,
            index: 4,
        };
        assert_eq!(
            e.to_string(),
            "index 4 at position 0 is outside the range 0..4"
        );

        let e = TensorError::InvalidContractionPair {
            index1: 1,
            index2: 1,
            rank: 2,
        };
        assert_eq!(
            e.to_string(),
            "cannot contract positions 1 and 1 of a rank 2 tensor"
        );
    }
}
