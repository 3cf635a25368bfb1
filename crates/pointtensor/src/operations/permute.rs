//! Index permutation and label alignment.
//!
//! ```text
//! align_to(tensor, labels)          # A_ba -> A_ab
//!     → locate each label in tensor.labels()
//!     → permute_indices(tensor, perm)
//! ```
//!
//! Used to add tensors whose labels name the same indices in a different
//! order: `A_ab + B_ba` is `add(&a, &b.align_to(a.labels())?)`.

use crate::codec::{self, MultiIndex};
use crate::error::TensorError;
use crate::label::Label;
use crate::storage::Dense;
use crate::tensor::Tensor;

/// Reorder the index positions of a tensor.
///
/// `perm[i]` gives the source position of result position `i`; types,
/// labels and components move together, so
/// `result[.., j_i, ..] == tensor[.., j_perm[i], ..]`.
///
/// # Errors
///
/// Returns `TensorError::InvalidPermutation` if `perm` is not a
/// permutation of `0..rank`.
///
/// # Examples
///
/// ```
/// use pointtensor::{IndexType, Tensor};
/// use pointtensor::operations::permute_indices;
///
/// let mut t = Tensor::new(&[IndexType::UP, IndexType::DOWN]);
/// t.set(&[1, 3], 2.0).unwrap();
///
/// let p = permute_indices(&t, &[1, 0]).unwrap();
/// assert_eq!(p.types(), &[IndexType::DOWN, IndexType::UP]);
/// assert_eq!(p.get(&[3, 1]).unwrap(), 2.0);
/// ```
pub fn permute_indices(tensor: &Tensor, perm: &[usize]) -> Result<Tensor, TensorError> {
    let rank = tensor.rank();
    validate_permutation(perm, rank)?;

    let types = perm.iter().map(|&p| tensor.types()[p]).collect();
    let labels = perm.iter().map(|&p| tensor.labels()[p]).collect();

    let src_data = tensor.components();
    let mut out_data = Dense::zeros(src_data.len());
    let mut src_indices = MultiIndex::from_elem(0, rank);
    let mut out_indices = MultiIndex::from_elem(0, rank);

    for (src_offset, &value) in src_data.iter().enumerate() {
        codec::decode_into(src_offset, &mut src_indices);
        for (slot, &p) in out_indices.iter_mut().zip(perm) {
            *slot = src_indices[p];
        }
        out_data[codec::encode(&out_indices)] = value;
    }

    Ok(Tensor::from_parts(types, labels, out_data))
}

/// For each position of `tensor`, the position of the same label in `other`.
///
/// Returns `None` if any label of `tensor` is free or absent from `other`.
///
/// # Examples
///
/// ```
/// use pointtensor::{IndexType, Label, Tensor};
/// use pointtensor::operations::label_permutation;
///
/// let t = Tensor::new(&[IndexType::DOWN, IndexType::DOWN])
///     .label(&['a', 'b'])
///     .unwrap();
/// let other = [Label::new('b'), Label::new('a')];
/// assert_eq!(label_permutation(&t, &other), Some(vec![1, 0]));
/// ```
pub fn label_permutation(tensor: &Tensor, other: &[Label]) -> Option<Vec<usize>> {
    tensor
        .labels()
        .iter()
        .map(|label| {
            if label.is_free() {
                None
            } else {
                other.iter().position(|l| l == label)
            }
        })
        .collect()
}

/// Permute a tensor so its labels appear in the order of `labels`.
///
/// # Errors
///
/// Returns `TensorError::LabelCountMismatch` if `labels.len() != rank`,
/// `TensorError::LabelNotFound` if a requested label is free or not carried
/// by the tensor, and `TensorError::InvalidPermutation` if a label is
/// requested twice.
pub fn align_to(tensor: &Tensor, labels: &[Label]) -> Result<Tensor, TensorError> {
    if labels.len() != tensor.rank() {
        return Err(TensorError::LabelCountMismatch {
            expected: tensor.rank(),
            actual: labels.len(),
        });
    }

    let perm = labels
        .iter()
        .map(|&label| {
            if label.is_free() {
                return Err(TensorError::LabelNotFound { label });
            }
            tensor
                .labels()
                .iter()
                .position(|&l| l == label)
                .ok_or(TensorError::LabelNotFound { label })
        })
        .collect::<Result<Vec<usize>, TensorError>>()?;

    permute_indices(tensor, &perm)
}

/// Validate that perm is a valid permutation of 0..rank.
fn validate_permutation(perm: &[usize], rank: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        perm: perm.to_vec(),
        rank,
    };

    if perm.len() != rank {
        return Err(invalid());
    }

    let mut seen = vec![false; rank];
    for &p in perm {
        if p >= rank || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_type::IndexType::{Contravariant as UP, Covariant as DOWN};

    fn numbered(types: &[crate::IndexType]) -> Tensor {
        let data = (0..codec::num_components(types.len()))
            .map(|x| x as f64)
            .collect();
        Tensor::from_vec(types, data).unwrap()
    }

    #[test]
    fn test_permute_transpose() {
        let t = numbered(&[UP, DOWN]);
        let p = permute_indices(&t, &[1, 0]).unwrap();
        assert_eq!(p.types(), &[DOWN, UP]);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(t.get(&[i, j]).unwrap(), p.get(&[j, i]).unwrap());
            }
        }
    }

    #[test]
    fn test_permute_rank3() {
        let t = numbered(&[UP, DOWN, DOWN]).label(&['a', 'b', 'c']).unwrap();
        let p = permute_indices(&t, &[2, 0, 1]).unwrap();
        assert_eq!(p.types(), &[DOWN, UP, DOWN]);
        assert_eq!(
            p.labels(),
            &[Label::new('c'), Label::new('a'), Label::new('b')]
        );
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    assert_eq!(t.get(&[i, j, k]).unwrap(), p.get(&[k, i, j]).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_permute_identity() {
        let t = numbered(&[UP, DOWN]);
        assert_eq!(permute_indices(&t, &[0, 1]).unwrap(), t);
    }

    #[test]
    fn test_permute_invalid() {
        let t = numbered(&[UP, DOWN]);
        assert!(permute_indices(&t, &[0]).is_err());
        assert!(permute_indices(&t, &[0, 1, 2]).is_err());
        assert!(permute_indices(&t, &[0, 2]).is_err());
        assert_eq!(
            permute_indices(&t, &[0, 0]),
            Err(TensorError::InvalidPermutation {
                perm: vec![0, 0],
                rank: 2
            })
        );
    }

    #[test]
    fn test_label_permutation_with_free_label() {
        let t = numbered(&[UP, DOWN]).label(&['a', '.']).unwrap();
        assert_eq!(label_permutation(&t, &[Label::new('a'), Label::FREE]), None);
    }

    #[test]
    fn test_label_permutation_missing() {
        let t = numbered(&[UP, DOWN]).label(&['a', 'b']).unwrap();
        assert_eq!(
            label_permutation(&t, &[Label::new('a'), Label::new('c')]),
            None
        );
    }

    #[test]
    fn test_align_to() {
        let b = numbered(&[DOWN, UP]).label(&['b', 'a']).unwrap();
        let aligned = align_to(&b, &[Label::new('a'), Label::new('b')]).unwrap();
        assert_eq!(aligned.types(), &[UP, DOWN]);
        assert_eq!(aligned.labels(), &[Label::new('a'), Label::new('b')]);
        assert_eq!(aligned.get(&[1, 2]).unwrap(), b.get(&[2, 1]).unwrap());
    }

    #[test]
    fn test_align_to_errors() {
        let t = numbered(&[DOWN, UP]).label(&['b', 'a']).unwrap();
        assert_eq!(
            align_to(&t, &[Label::new('a')]),
            Err(TensorError::LabelCountMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            align_to(&t, &[Label::new('a'), Label::new('z')]),
            Err(TensorError::LabelNotFound {
                label: Label::new('z')
            })
        );
        assert!(align_to(&t, &[Label::new('a'), Label::new('a')]).is_err());
    }
}
