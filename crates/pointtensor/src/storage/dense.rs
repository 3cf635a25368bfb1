//! Dense storage for tensor components.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense storage - contiguous array of components in row-major order.
///
/// The length is fixed at construction; the storage can be read and written
/// element-wise but never resized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Dense {
    data: Vec<f64>,
}

impl Dense {
    /// Create dense storage with given length, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    /// Create dense storage from existing vector (takes ownership).
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Length of storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if storage is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get immutable slice of data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable slice of data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get element by offset.
    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.data.get(i).copied()
    }
}

impl std::ops::Index<usize> for Dense {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

impl std::ops::IndexMut<usize> for Dense {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let d = Dense::zeros(16);
        assert_eq!(d.len(), 16);
        assert!(!d.is_empty());
        assert!(d.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_vec() {
        let d = Dense::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(d.len(), 4);
        assert_eq!(d[0], 1.0);
        assert_eq!(d[3], 4.0);
        assert_eq!(d.get(3), Some(4.0));
        assert_eq!(d.get(4), None);
    }

    #[test]
    fn test_index_mut() {
        let mut d = Dense::zeros(4);
        d[1] = 5.0;
        assert_eq!(d.as_slice(), &[0.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = Dense::from_vec(vec![1.0, 2.0]);
        let mut b = a.clone();
        b[0] = 9.0;
        assert_eq!(a[0], 1.0);
        assert_eq!(b[0], 9.0);
    }
}
