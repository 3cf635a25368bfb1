//! Named collection of point tensors.
//!
//! Evolution codes keep the fields of one grid point (metric, extrinsic
//! curvature, lapse, ...) together and move all of their components in and
//! out of a single flat buffer. Tensors are ordered by name, so the packing
//! order is stable.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::TensorError;
use crate::index_type::parse_index_types;
use crate::tensor::Tensor;

/// Tensors keyed by name, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TensorList {
    tensors: BTreeMap<String, Tensor>,
}

impl TensorList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zero tensor whose index types are given as a string such as
    /// `"dd"` or `"u_"`.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::InvalidIndexType` for an unknown character and
    /// `TensorError::DuplicateTensor` if the name is taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointtensor::{IndexType, TensorList};
    ///
    /// let mut fields = TensorList::new();
    /// fields.append("g", "dd").unwrap();
    /// fields.append_scalar("alpha").unwrap();
    ///
    /// assert_eq!(fields.get("g").unwrap().types(), &[IndexType::DOWN; 2]);
    /// assert_eq!(fields.num_components(), 17);
    /// ```
    pub fn append(&mut self, name: &str, index_types: &str) -> Result<&mut Tensor, TensorError> {
        let types = parse_index_types(index_types)?;
        self.insert(name, Tensor::new(&types))
    }

    /// Add a zero scalar.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::DuplicateTensor` if the name is taken.
    pub fn append_scalar(&mut self, name: &str) -> Result<&mut Tensor, TensorError> {
        self.insert(name, Tensor::scalar(0.0))
    }

    /// Add an existing tensor.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::DuplicateTensor` if the name is taken.
    pub fn insert(&mut self, name: &str, tensor: Tensor) -> Result<&mut Tensor, TensorError> {
        use std::collections::btree_map::Entry;

        match self.tensors.entry(name.to_string()) {
            Entry::Occupied(_) => Err(TensorError::DuplicateTensor {
                name: name.to_string(),
            }),
            Entry::Vacant(slot) => {
                debug!(name, rank = tensor.rank(), "added tensor to list");
                Ok(slot.insert(tensor))
            }
        }
    }

    /// Look up a tensor by name.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::UnknownTensor` if no tensor has this name.
    pub fn get(&self, name: &str) -> Result<&Tensor, TensorError> {
        self.tensors.get(name).ok_or_else(|| TensorError::UnknownTensor {
            name: name.to_string(),
        })
    }

    /// Look up a tensor by name for modification.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::UnknownTensor` if no tensor has this name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Tensor, TensorError> {
        self.tensors
            .get_mut(name)
            .ok_or_else(|| TensorError::UnknownTensor {
                name: name.to_string(),
            })
    }

    /// Number of tensors.
    pub fn len(&self) -> usize {
        self.tensors.len()
    }

    /// Whether the list holds no tensors.
    pub fn is_empty(&self) -> bool {
        self.tensors.is_empty()
    }

    /// Names and tensors in packing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tensor)> {
        self.tensors.iter().map(|(name, t)| (name.as_str(), t))
    }

    /// Total number of components over all tensors.
    pub fn num_components(&self) -> usize {
        self.tensors.values().map(Tensor::num_components).sum()
    }

    /// Pack every component into the front of `out`, tensors in name order.
    ///
    /// Returns the number of values written.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ComponentCountMismatch` if `out` is shorter than
    /// [`TensorList::num_components`].
    pub fn copy_components_into(&self, out: &mut [f64]) -> Result<usize, TensorError> {
        let total = self.num_components();
        if out.len() < total {
            return Err(TensorError::ComponentCountMismatch {
                expected: total,
                actual: out.len(),
            });
        }

        let mut written = 0;
        for tensor in self.tensors.values() {
            written += tensor.copy_components_into(&mut out[written..])?;
        }
        trace!(written, "packed tensor list");
        Ok(written)
    }

    /// Unpack components from the front of `values`, tensors in name order.
    ///
    /// Returns the number of values read.
    ///
    /// # Errors
    ///
    /// Returns `TensorError::ComponentCountMismatch` if `values` is shorter
    /// than [`TensorList::num_components`]; no tensor is modified then.
    pub fn set_components(&mut self, values: &[f64]) -> Result<usize, TensorError> {
        let total = self.num_components();
        if values.len() < total {
            return Err(TensorError::ComponentCountMismatch {
                expected: total,
                actual: values.len(),
            });
        }

        let mut read = 0;
        for tensor in self.tensors.values_mut() {
            let n = tensor.num_components();
            tensor.set_components(&values[read..read + n])?;
            read += n;
        }
        trace!(read, "unpacked tensor list");
        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::index_type::IndexType;

    #[test]
    fn test_append_and_get() {
        let mut list = TensorList::new();
        list.append("K", "dd").unwrap();
        list.append("beta", "u").unwrap();
        list.append_scalar("alpha").unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.get("beta").unwrap().types(), &[IndexType::UP]);
        assert_eq!(list.get("alpha").unwrap().rank(), 0);
        assert_eq!(list.num_components(), 16 + 4 + 1);
    }

    #[test]
    fn test_unknown_and_duplicate() {
        let mut list = TensorList::new();
        list.append("g", "dd").unwrap();
        assert_eq!(
            list.append("g", "uu").unwrap_err(),
            TensorError::DuplicateTensor {
                name: "g".to_string()
            }
        );
        assert_eq!(
            list.get("h").unwrap_err().kind(),
            ErrorKind::Usage
        );
        assert!(list.append("h", "dx").is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let mut list = TensorList::new();
        list.append_scalar("c").unwrap();
        list.append_scalar("a").unwrap();
        list.append_scalar("b").unwrap();
        let names: Vec<&str> = list.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pack_unpack() {
        let mut list = TensorList::new();
        list.append("v", "u").unwrap();
        list.append_scalar("a").unwrap();

        let values: Vec<f64> = (1..=5).map(|x| x as f64).collect();
        assert_eq!(list.set_components(&values).unwrap(), 5);

        // "a" packs before "v"
        assert_eq!(list.get("a").unwrap().value(), Some(1.0));
        assert_eq!(list.get("v").unwrap().components(), &[2.0, 3.0, 4.0, 5.0]);

        let mut out = vec![0.0; 7];
        assert_eq!(list.copy_components_into(&mut out).unwrap(), 5);
        assert_eq!(&out[..5], values.as_slice());
    }

    #[test]
    fn test_unpack_short_buffer_leaves_list() {
        let mut list = TensorList::new();
        list.append("v", "u").unwrap();
        list.get_mut("v").unwrap().fill(9.0);

        assert!(list.set_components(&[1.0, 2.0]).is_err());
        assert!(list.get("v").unwrap().components().iter().all(|&x| x == 9.0));

        let mut short = [0.0; 3];
        assert!(list.copy_components_into(&mut short).is_err());
    }
}
