//! Outer product and Einstein-summed multiplication.

use tracing::trace;

use crate::error::TensorError;
use crate::storage::Dense;
use crate::tensor::Tensor;

/// Compute the outer product of two tensors.
///
/// For A of rank m and B of rank n, returns C of rank m + n with
/// `C[i0.., j0..] = A[i0..] * B[j0..]`. Types and labels are concatenated in
/// operand order. No contraction is performed.
///
/// # Example
///
/// ```
/// use pointtensor::{IndexType, Tensor};
/// use pointtensor::operations::outer;
///
/// let a = Tensor::from_vec(&[IndexType::UP], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Tensor::from_vec(&[IndexType::DOWN], vec![1.0, 0.0, 0.0, 10.0]).unwrap();
/// let c = outer(&a, &b);
///
/// assert_eq!(c.types(), &[IndexType::UP, IndexType::DOWN]);
/// assert_eq!(c.get(&[1, 3]).unwrap(), 20.0);
/// assert_eq!(c.get(&[2, 0]).unwrap(), 3.0);
/// ```
pub fn outer(a: &Tensor, b: &Tensor) -> Tensor {
    let types = a.types().iter().chain(b.types()).copied().collect();
    let labels = a.labels().iter().chain(b.labels()).copied().collect();

    let mut data = Dense::zeros(a.num_components() * b.num_components());
    fill_outer(data.as_mut_slice(), a.components(), b.components());

    Tensor::from_parts(types, labels, data)
}

/// Write the outer product of `a` and `b` into a pre-allocated slice.
///
/// The slice must hold exactly `a.num_components() * b.num_components()`
/// values and receives them in row-major order.
///
/// # Errors
///
/// Returns `TensorError::ComponentCountMismatch` if the slice has the wrong
/// length; it is left untouched in that case.
pub fn outer_into(out: &mut [f64], a: &Tensor, b: &Tensor) -> Result<(), TensorError> {
    let expected = a.num_components() * b.num_components();
    if out.len() != expected {
        return Err(TensorError::ComponentCountMismatch {
            expected,
            actual: out.len(),
        });
    }

    fill_outer(out, a.components(), b.components());
    Ok(())
}

// Row-major: the offset of [i.., j..] is offset(i..) * len(B) + offset(j..)
fn fill_outer(out: &mut [f64], a_data: &[f64], b_data: &[f64]) {
    for (row, &a_i) in out.chunks_exact_mut(b_data.len()).zip(a_data) {
        for (slot, &b_j) in row.iter_mut().zip(b_data) {
            *slot = a_i * b_j;
        }
    }
}

/// Multiply two tensors and contract repeated labels.
///
/// Forms the outer product, then sums over every label that now appears at
/// two positions, realizing the Einstein summation convention for a product
/// expression.
///
/// # Errors
///
/// Fails like [`contract_labels`](crate::contract::contract_labels) on the
/// outer product: a label repeated more than twice across both operands, or
/// pairing two indices of the same type.
///
/// # Example
///
/// ```
/// use pointtensor::{IndexType, Tensor};
/// use pointtensor::operations::multiply;
///
/// let u = Tensor::from_vec(&[IndexType::UP], vec![1.0, 2.0, 3.0, 4.0])
///     .unwrap()
///     .label(&['a'])
///     .unwrap();
/// let w = Tensor::from_vec(&[IndexType::DOWN], vec![1.0, 1.0, 1.0, 1.0])
///     .unwrap()
///     .label(&['a'])
///     .unwrap();
///
/// let s = multiply(&u, &w).unwrap();
/// assert_eq!(s.rank(), 0);
/// assert_eq!(s.value(), Some(10.0));
/// ```
pub fn multiply(a: &Tensor, b: &Tensor) -> Result<Tensor, TensorError> {
    trace!(rank_a = a.rank(), rank_b = b.rank(), "multiplying tensors");
    outer(a, b).contract_labels()
}
