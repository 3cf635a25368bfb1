//! The point tensor type.
//!
//! ```text
//! Tensor
//! ├── types       one IndexType per position (fixed)
//! ├── labels      one Label per position (Einstein summation)
//! └── components  Dense storage of DIMENSION^rank f64, row-major
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec::{self, MultiIndex};
use crate::error::TensorError;
use crate::index_type::IndexType;
use crate::label::{Label, LabelSpec};
use crate::storage::Dense;

/// Components of a tensor at a single point of four-dimensional spacetime.
///
/// Each index position carries a fixed [`IndexType`] and a mutable
/// [`Label`]. Every instance owns its storage; cloning is a deep copy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TensorParts"))]
pub struct Tensor {
    types: Vec<IndexType>,
    labels: Vec<Label>,
    components: Dense,
}

impl Tensor {
    /// Create a zero-filled tensor with the given index types.
    ///
    /// The rank is the number of types; an empty slice gives a scalar.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointtensor::{IndexType, Tensor};
    ///
    /// let t = Tensor::new(&[IndexType::UP, IndexType::DOWN]);
    /// assert_eq!(t.rank(), 2);
    /// assert_eq!(t.num_components(), 16);
    /// assert!(t.components().iter().all(|&x| x == 0.0));
    /// ```
    pub fn new(types: &[IndexType]) -> Self {
        Self::from_parts(
            types.to_vec(),
            vec![Label::FREE; types.len()],
            Dense::zeros(codec::num_components(types.len())),
        )
    }

    /// Create a rank-0 tensor holding `value`.
    pub fn scalar(value: f64) -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Dense::from_vec(vec![value]))
    }

    /// Create a tensor from index types and row-major component data.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ComponentCountMismatch` if `data.len()` is not
    /// `4^types.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointtensor::{IndexType, Tensor};
    ///
    /// let v = Tensor::from_vec(&[IndexType::UP], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(v.get(&[2]).unwrap(), 3.0);
    /// assert!(Tensor::from_vec(&[IndexType::UP], vec![1.0]).is_err());
    /// ```
    pub fn from_vec(types: &[IndexType], data: Vec<f64>) -> Result<Self, TensorError> {
        let expected = codec::num_components(types.len());
        if data.len() != expected {
            return Err(TensorError::ComponentCountMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(
            types.to_vec(),
            vec![Label::FREE; types.len()],
            Dense::from_vec(data),
        ))
    }

    /// Assemble a tensor from sequences already known to be consistent.
    pub(crate) fn from_parts(types: Vec<IndexType>, labels: Vec<Label>, components: Dense) -> Self {
        debug_assert_eq!(types.len(), labels.len());
        debug_assert_eq!(components.len(), codec::num_components(types.len()));
        Self {
            types,
            labels,
            components,
        }
    }

    /// Number of indices.
    #[inline]
    pub fn rank(&self) -> usize {
        self.types.len()
    }

    /// Index type of each position.
    #[inline]
    pub fn types(&self) -> &[IndexType] {
        &self.types
    }

    /// Label of each position.
    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Replace the labels. Callers guarantee `labels.len() == rank`.
    pub(crate) fn set_labels(&mut self, labels: Vec<Label>) {
        debug_assert_eq!(labels.len(), self.rank());
        self.labels = labels;
    }

    /// Total number of components, `4^rank`.
    #[inline]
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// All components in row-major order.
    #[inline]
    pub fn components(&self) -> &[f64] {
        self.components.as_slice()
    }

    /// Mutable view of all components in row-major order.
    ///
    /// This is a low-level escape hatch for callers that iterate over the
    /// raw storage (time evolution, I/O). It skips the per-index bounds
    /// checks of [`Tensor::set`]; the slice cannot change the storage length.
    #[inline]
    pub fn components_mut(&mut self) -> &mut [f64] {
        self.components.as_mut_slice()
    }

    /// Flat offset of a multi-index.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::WrongNumberOfIndices` if `indices.len() != rank`
    /// and `TensorError::DomainError` if any index is outside `0..4`.
    pub fn offset_of(&self, indices: &[usize]) -> Result<usize, TensorError> {
        if indices.len() != self.rank() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: self.rank(),
                actual: indices.len(),
            });
        }
        codec::indices_to_offset(indices)
    }

    /// Multi-index of a flat offset.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::OffsetOutOfRange` if `offset >= 4^rank`.
    pub fn indices_at(&self, offset: usize) -> Result<MultiIndex, TensorError> {
        codec::offset_to_indices(offset, self.rank())
    }

    /// Get a component by multi-index.
    ///
    /// # Errors
    ///
    /// Same as [`Tensor::offset_of`].
    pub fn get(&self, indices: &[usize]) -> Result<f64, TensorError> {
        let offset = self.offset_of(indices)?;
        Ok(self.components[offset])
    }

    /// Set a component by multi-index.
    ///
    /// # Errors
    ///
    /// Same as [`Tensor::offset_of`]; the tensor is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointtensor::{IndexType, Tensor};
    ///
    /// let mut t = Tensor::new(&[IndexType::DOWN, IndexType::DOWN]);
    /// t.set(&[1, 2], 5.0).unwrap();
    /// assert_eq!(t.get(&[1, 2]).unwrap(), 5.0);
    /// assert!(t.set(&[1, 4], 1.0).is_err());
    /// ```
    pub fn set(&mut self, indices: &[usize], value: f64) -> Result<(), TensorError> {
        let offset = self.offset_of(indices)?;
        self.components[offset] = value;
        Ok(())
    }

    /// The single component of a rank-0 tensor, `None` for higher ranks.
    pub fn value(&self) -> Option<f64> {
        if self.rank() == 0 {
            self.components.get(0)
        } else {
            None
        }
    }

    /// Fill all components with a value.
    pub fn fill(&mut self, value: f64) {
        for x in self.components.as_mut_slice() {
            *x = value;
        }
    }

    /// Overwrite every component from a row-major slice.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ComponentCountMismatch` unless
    /// `values.len() == 4^rank`; the tensor is unchanged on error.
    pub fn set_components(&mut self, values: &[f64]) -> Result<(), TensorError> {
        if values.len() != self.num_components() {
            return Err(TensorError::ComponentCountMismatch {
                expected: self.num_components(),
                actual: values.len(),
            });
        }
        self.components.as_mut_slice().copy_from_slice(values);
        Ok(())
    }

    /// Copy every component into the front of `out`, returning the count.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ComponentCountMismatch` if `out` is shorter
    /// than `4^rank`.
    pub fn copy_components_into(&self, out: &mut [f64]) -> Result<usize, TensorError> {
        let n = self.num_components();
        if out.len() < n {
            return Err(TensorError::ComponentCountMismatch {
                expected: n,
                actual: out.len(),
            });
        }
        out[..n].copy_from_slice(self.components());
        Ok(n)
    }

    /// Contract (trace) two index positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointtensor::{IndexType, Tensor};
    ///
    /// let mut delta = Tensor::new(&[IndexType::UP, IndexType::DOWN]);
    /// for i in 0..4 {
    ///     delta.set(&[i, i], 1.0).unwrap();
    /// }
    /// let trace = delta.contract(0, 1).unwrap();
    /// assert_eq!(trace.value(), Some(4.0));
    /// ```
    pub fn contract(&self, index1: usize, index2: usize) -> Result<Tensor, TensorError> {
        crate::contract::contract(self, index1, index2)
    }

    /// Contract every pair of positions sharing a non-free label.
    pub fn contract_labels(&self) -> Result<Tensor, TensorError> {
        crate::contract::contract_labels(self)
    }

    /// Name the indices and contract repeated names.
    ///
    /// Returns a new tensor; `self` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::LabelCountMismatch` if the number of tokens is
    /// not the rank, or an `InvalidContractionPair`-kind error if a label is
    /// repeated more than twice or pairs two indices of the same type.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointtensor::{IndexType, LabelSpec, Tensor};
    ///
    /// let t = Tensor::new(&[IndexType::UP, IndexType::DOWN, IndexType::DOWN]);
    /// let named = t.label(&['a', 'b', 'c']).unwrap();
    /// assert_eq!(named.rank(), 3);
    ///
    /// let traced = t.label(&['a', 'a', 'c']).unwrap();
    /// assert_eq!(traced.rank(), 1);
    ///
    /// let cleared = named.label(LabelSpec::Clear).unwrap();
    /// assert!(cleared.labels().iter().all(|l| l.is_free()));
    /// ```
    pub fn label<'a>(&self, spec: impl Into<LabelSpec<'a>>) -> Result<Tensor, TensorError> {
        crate::contract::apply_labels(self, spec.into())
    }

    /// Reorder index positions; `perm[i]` is the source position of result
    /// position `i`.
    pub fn permute_indices(&self, perm: &[usize]) -> Result<Tensor, TensorError> {
        crate::operations::permute_indices(self, perm)
    }

    /// Permute positions so the labels appear in the order given.
    pub fn align_to(&self, labels: &[Label]) -> Result<Tensor, TensorError> {
        crate::operations::align_to(self, labels)
    }

    /// For each position, where the same label sits in `other`.
    pub fn label_permutation(&self, other: &[Label]) -> Option<Vec<usize>> {
        crate::operations::label_permutation(self, other)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TensorParts {
    types: Vec<IndexType>,
    labels: Vec<Label>,
    components: Dense,
}

#[cfg(feature = "serde")]
impl TryFrom<TensorParts> for Tensor {
    type Error = TensorError;

    fn try_from(parts: TensorParts) -> Result<Self, Self::Error> {
        if parts.labels.len() != parts.types.len() {
            return Err(TensorError::LabelCountMismatch {
                expected: parts.types.len(),
                actual: parts.labels.len(),
            });
        }
        let expected = codec::num_components(parts.types.len());
        if parts.components.len() != expected {
            return Err(TensorError::ComponentCountMismatch {
                expected,
                actual: parts.components.len(),
            });
        }
        Ok(Self::from_parts(parts.types, parts.labels, parts.components))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_type::IndexType::{Contravariant as UP, Covariant as DOWN};

    #[test]
    fn test_new() {
        let t = Tensor::new(&[UP, DOWN, DOWN]);
        assert_eq!(t.rank(), 3);
        assert_eq!(t.types(), &[UP, DOWN, DOWN]);
        assert_eq!(t.labels(), &[Label::FREE; 3]);
        assert_eq!(t.num_components(), 64);
        assert!(t.components().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_scalar() {
        let s = Tensor::scalar(2.5);
        assert_eq!(s.rank(), 0);
        assert_eq!(s.num_components(), 1);
        assert_eq!(s.value(), Some(2.5));
        assert_eq!(s.get(&[]).unwrap(), 2.5);

        let zero = Tensor::new(&[]);
        assert_eq!(zero.value(), Some(0.0));
    }

    #[test]
    fn test_value_none_for_higher_rank() {
        assert_eq!(Tensor::new(&[UP]).value(), None);
    }

    #[test]
    fn test_set_get() {
        let mut t = Tensor::new(&[UP, DOWN]);
        t.set(&[2, 3], 7.0).unwrap();
        assert_eq!(t.get(&[2, 3]).unwrap(), 7.0);
        assert_eq!(t.get(&[3, 2]).unwrap(), 0.0);
        // row-major: 4*2 + 3
        assert_eq!(t.components()[11], 7.0);
    }

    #[test]
    fn test_get_domain_error() {
        let t = Tensor::new(&[UP, DOWN]);
        assert_eq!(
            t.get(&[0, 4]),
            Err(TensorError::DomainError {
                position: 1,
                index: 4
            })
        );
    }

    #[test]
    fn test_wrong_number_of_indices() {
        let mut t = Tensor::new(&[UP, DOWN]);
        assert_eq!(
            t.set(&[0], 1.0),
            Err(TensorError::WrongNumberOfIndices {
                expected: 2,
                actual: 1
            })
        );
        assert!(t.get(&[0, 0, 0]).is_err());
        assert!(t.components().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_offset_of_and_indices_at() {
        let t = Tensor::new(&[UP, UP, DOWN]);
        assert_eq!(t.offset_of(&[1, 2, 3]).unwrap(), 16 + 8 + 3);
        assert_eq!(t.indices_at(27).unwrap().as_slice(), &[1, 2, 3]);
        assert!(t.indices_at(64).is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut a = Tensor::new(&[UP]);
        a.set(&[0], 1.0).unwrap();
        let mut b = a.clone();
        b.set(&[0], 2.0).unwrap();
        assert_eq!(a.get(&[0]).unwrap(), 1.0);
        assert_eq!(b.get(&[0]).unwrap(), 2.0);
    }

    #[test]
    fn test_components_mut() {
        let mut t = Tensor::new(&[DOWN]);
        for (i, x) in t.components_mut().iter_mut().enumerate() {
            *x = i as f64;
        }
        assert_eq!(t.get(&[3]).unwrap(), 3.0);
    }

    #[test]
    fn test_fill() {
        let mut t = Tensor::new(&[DOWN, DOWN]);
        t.fill(1.5);
        assert!(t.components().iter().all(|&x| x == 1.5));
    }

    #[test]
    fn test_set_components() {
        let mut t = Tensor::new(&[UP]);
        t.set_components(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(t.components(), &[1.0, 2.0, 3.0, 4.0]);

        let err = t.set_components(&[0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            TensorError::ComponentCountMismatch {
                expected: 4,
                actual: 3
            }
        );
        assert_eq!(t.components(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_copy_components_into() {
        let t = Tensor::from_vec(&[UP], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut buf = [0.0; 6];
        assert_eq!(t.copy_components_into(&mut buf).unwrap(), 4);
        assert_eq!(buf, [1.0, 2.0, 3.0, 4.0, 0.0, 0.0]);

        let mut short = [0.0; 2];
        assert!(t.copy_components_into(&mut short).is_err());
    }

    #[test]
    fn test_from_vec_mismatch() {
        assert_eq!(
            Tensor::from_vec(&[UP, DOWN], vec![0.0; 4]),
            Err(TensorError::ComponentCountMismatch {
                expected: 16,
                actual: 4
            })
        );
    }
}
