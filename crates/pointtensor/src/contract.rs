//! Tensor contraction operations.
//!
//! Two entry points:
//! - [`contract`]: trace over an explicit pair of index positions
//! - [`contract_labels`]: trace over every pair of positions sharing a
//!   non-free label (Einstein summation)
//!
//! [`apply_labels`] sets the labels of a copy and then runs the label pass.

use tracing::{debug, trace};

use crate::codec::{self, DIMENSION, MultiIndex};
use crate::error::TensorError;
use crate::label::{Label, LabelSpec, label_positions};
use crate::storage::Dense;
use crate::tensor::Tensor;

/// Contract (trace) index positions `index1` and `index2`.
///
/// The result has rank `rank - 2`; its component at a multi-index `I` is
/// `Σ_k T[I with k inserted at index1 and index2]`. Index types and labels
/// of the remaining positions keep their relative order.
///
/// # Errors
///
/// Returns `TensorError::InvalidContractionPair` if the positions are equal
/// or either is not below the rank.
///
/// # Examples
///
/// ```
/// use pointtensor::{IndexType, Tensor, contract};
///
/// // T^a_b_c with T^a_b_c = 1 when a == b
/// let mut t = Tensor::new(&[IndexType::UP, IndexType::DOWN, IndexType::DOWN]);
/// for a in 0..4 {
///     for c in 0..4 {
///         t.set(&[a, a, c], 1.0).unwrap();
///     }
/// }
/// let r = contract(&t, 0, 1).unwrap();
/// assert_eq!(r.types(), &[IndexType::DOWN]);
/// assert_eq!(r.components(), &[4.0, 4.0, 4.0, 4.0]);
/// ```
pub fn contract(tensor: &Tensor, index1: usize, index2: usize) -> Result<Tensor, TensorError> {
    let rank = tensor.rank();
    if index1 >= rank || index2 >= rank || index1 == index2 {
        return Err(TensorError::InvalidContractionPair {
            index1,
            index2,
            rank,
        });
    }
    trace!(rank, index1, index2, "contracting index pair");

    let (lo, hi) = if index1 < index2 {
        (index1, index2)
    } else {
        (index2, index1)
    };
    let kept = |pos: &usize| *pos != lo && *pos != hi;

    let types = (0..rank)
        .filter(kept)
        .map(|pos| tensor.types()[pos])
        .collect();
    let labels = (0..rank)
        .filter(kept)
        .map(|pos| tensor.labels()[pos])
        .collect();

    let out_rank = rank - 2;
    let mut out_data = Dense::zeros(codec::num_components(out_rank));
    let src_data = tensor.components();

    let mut out_indices = MultiIndex::from_elem(0, out_rank);
    let mut src_indices = MultiIndex::from_elem(0, rank);

    for out_offset in 0..out_data.len() {
        codec::decode_into(out_offset, &mut out_indices);

        // Scatter the output indices around the contracted positions
        let mut next = 0;
        for pos in 0..rank {
            if pos != lo && pos != hi {
                src_indices[pos] = out_indices[next];
                next += 1;
            }
        }

        let mut sum = 0.0;
        for k in 0..DIMENSION {
            src_indices[lo] = k;
            src_indices[hi] = k;
            sum += src_data[codec::encode(&src_indices)];
        }
        out_data[out_offset] = sum;
    }

    Ok(Tensor::from_parts(types, labels, out_data))
}

/// Contract every pair of positions that share a non-free label.
///
/// Pairs are contracted one at a time in order of first appearance until no
/// repeated label remains, so labels `(a, a, b, b)` are fully traced in one
/// call. A tensor without repeated labels is returned unchanged.
///
/// # Errors
///
/// Returns `TensorError::InvalidLabelContraction` if a label appears at more
/// than two positions or pairs two positions with the same index type. The
/// labels are validated before any contraction happens.
pub fn contract_labels(tensor: &Tensor) -> Result<Tensor, TensorError> {
    validate_label_pairs(tensor)?;

    let mut result = tensor.clone();
    let mut pairs = 0;
    while let Some((i, j)) = first_repeated_pair(result.labels()) {
        result = contract(&result, i, j)?;
        pairs += 1;
    }

    if pairs > 0 {
        debug!(
            pairs,
            rank_in = tensor.rank(),
            rank_out = result.rank(),
            "contracted repeated labels"
        );
    }
    Ok(result)
}

/// Set the labels of a copy of `tensor` and contract repeated labels.
///
/// # Errors
///
/// Returns `TensorError::LabelCountMismatch` if `spec` carries a number of
/// tokens other than the rank, plus the errors of [`contract_labels`].
pub fn apply_labels(tensor: &Tensor, spec: LabelSpec<'_>) -> Result<Tensor, TensorError> {
    let labels = match spec {
        LabelSpec::Clear => vec![Label::FREE; tensor.rank()],
        LabelSpec::Tokens(tokens) => {
            if tokens.len() != tensor.rank() {
                return Err(TensorError::LabelCountMismatch {
                    expected: tensor.rank(),
                    actual: tokens.len(),
                });
            }
            tokens.iter().map(|&c| Label::new(c)).collect()
        }
    };

    let mut labelled = tensor.clone();
    labelled.set_labels(labels);
    contract_labels(&labelled)
}

fn validate_label_pairs(tensor: &Tensor) -> Result<(), TensorError> {
    for (label, positions) in label_positions(tensor.labels()) {
        match positions.as_slice() {
            [_] => {}
            [i, j] => {
                let ty = tensor.types()[*i];
                if ty == tensor.types()[*j] {
                    return Err(TensorError::InvalidLabelContraction {
                        label,
                        reason: format!("positions {i} and {j} are both {ty:?}"),
                    });
                }
            }
            _ => {
                return Err(TensorError::InvalidLabelContraction {
                    label,
                    reason: format!("appears at {} positions {:?}", positions.len(), positions),
                });
            }
        }
    }
    Ok(())
}

fn first_repeated_pair(labels: &[Label]) -> Option<(usize, usize)> {
    label_positions(labels)
        .into_iter()
        .find_map(|(_, positions)| match positions.as_slice() {
            [i, j] => Some((*i, *j)),
            _ => None,
        })
}
