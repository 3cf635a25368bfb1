//! Index codec: multi-index ⇄ flat storage offset.
//!
//! Offsets are positional base-`DIMENSION` numbers with the first index as
//! the most significant digit (row-major order):
//!
//! ```text
//! offset = Σ_k indices[k] * DIMENSION^(rank-1-k)
//! ```

use smallvec::SmallVec;

use crate::error::TensorError;

/// Range of every index, the dimension of spacetime.
pub const DIMENSION: usize = 4;

/// A multi-index: one value in `0..DIMENSION` per index position.
///
/// Inline for ranks up to 8, which covers every tensor that appears in
/// practice (the Riemann tensor has rank 4).
pub type MultiIndex = SmallVec<[usize; 8]>;

/// Integer power `base^exp`.
///
/// # Examples
///
/// ```
/// use pointtensor::codec::ipow;
///
/// assert_eq!(ipow(4, 0), 1);
/// assert_eq!(ipow(4, 3), 64);
/// ```
#[inline]
pub const fn ipow(base: usize, exp: usize) -> usize {
    let mut result = 1;
    let mut k = 0;
    while k < exp {
        result *= base;
        k += 1;
    }
    result
}

/// Number of components of a rank-`rank` tensor.
#[inline]
pub const fn num_components(rank: usize) -> usize {
    ipow(DIMENSION, rank)
}

/// Check every entry of a multi-index against the dimension.
pub fn check_indices(indices: &[usize]) -> Result<(), TensorError> {
    match indices.iter().position(|&idx| idx >= DIMENSION) {
        Some(position) => Err(TensorError::DomainError {
            position,
            index: indices[position],
        }),
        None => Ok(()),
    }
}

/// Convert a multi-index to a flat offset.
///
/// # Errors
///
/// Returns `TensorError::DomainError` if any index is outside
/// `0..DIMENSION`.
///
/// # Examples
///
/// ```
/// use pointtensor::codec::indices_to_offset;
///
/// assert_eq!(indices_to_offset(&[]).unwrap(), 0);
/// assert_eq!(indices_to_offset(&[1, 2]).unwrap(), 6);
/// assert_eq!(indices_to_offset(&[3, 0, 1]).unwrap(), 49);
/// assert!(indices_to_offset(&[0, 4]).is_err());
/// ```
pub fn indices_to_offset(indices: &[usize]) -> Result<usize, TensorError> {
    check_indices(indices)?;
    Ok(encode(indices))
}

/// Convert a flat offset to the multi-index of a rank-`rank` tensor.
///
/// # Errors
///
/// Returns `TensorError::OffsetOutOfRange` if `offset >= DIMENSION^rank`.
///
/// # Examples
///
/// ```
/// use pointtensor::codec::offset_to_indices;
///
/// assert_eq!(offset_to_indices(6, 2).unwrap().as_slice(), &[1, 2]);
/// assert_eq!(offset_to_indices(0, 0).unwrap().len(), 0);
/// assert!(offset_to_indices(16, 2).is_err());
/// ```
pub fn offset_to_indices(offset: usize, rank: usize) -> Result<MultiIndex, TensorError> {
    let len = num_components(rank);
    if offset >= len {
        return Err(TensorError::OffsetOutOfRange { offset, len });
    }
    let mut indices = MultiIndex::from_elem(0, rank);
    decode_into(offset, &mut indices);
    Ok(indices)
}

/// Encode a multi-index already known to be in range.
#[inline]
pub(crate) fn encode(indices: &[usize]) -> usize {
    indices
        .iter()
        .fold(0, |offset, &idx| offset * DIMENSION + idx)
}

/// Decode `offset` into `indices`, whose length is the rank.
#[inline]
pub(crate) fn decode_into(mut offset: usize, indices: &mut [usize]) {
    for slot in indices.iter_mut().rev() {
        *slot = offset % DIMENSION;
        offset /= DIMENSION;
    }
}
