//! Element-wise tensor operations: scaling, addition and subtraction.

use std::ops::{Mul, MulAssign, Neg};

use crate::error::TensorError;
use crate::tensor::Tensor;

/// Multiply all components by a scalar, returning a new tensor.
///
/// # Example
///
/// ```
/// use pointtensor::{IndexType, Tensor};
/// use pointtensor::operations::scale;
///
/// let t = Tensor::from_vec(&[IndexType::UP], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let ts = scale(&t, 2.0);
/// assert_eq!(ts.components(), &[2.0, 4.0, 6.0, 8.0]);
/// ```
pub fn scale(tensor: &Tensor, alpha: f64) -> Tensor {
    let mut result = tensor.clone();
    scale_inplace(&mut result, alpha);
    result
}

/// Scale tensor in-place, returning it for chaining.
///
/// # Example
///
/// ```
/// use pointtensor::{IndexType, Tensor};
/// use pointtensor::operations::scale_inplace;
///
/// let mut t = Tensor::from_vec(&[IndexType::UP], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// scale_inplace(&mut t, 0.5);
/// assert_eq!(t.components(), &[0.5, 1.0, 1.5, 2.0]);
/// ```
pub fn scale_inplace(tensor: &mut Tensor, alpha: f64) -> &mut Tensor {
    for x in tensor.components_mut() {
        *x *= alpha;
    }
    tensor
}

/// Component-wise sum of two tensors with the same index types.
///
/// The result carries the labels of `a`.
///
/// # Errors
///
/// Returns `TensorError::RankMismatch` unless both tensors have identical
/// index-type sequences (which implies equal rank).
///
/// # Example
///
/// ```
/// use pointtensor::{IndexType, Tensor};
/// use pointtensor::operations::add;
///
/// let a = Tensor::from_vec(&[IndexType::UP], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Tensor::from_vec(&[IndexType::UP], vec![4.0, 3.0, 2.0, 1.0]).unwrap();
/// assert_eq!(add(&a, &b).unwrap().components(), &[5.0; 4]);
///
/// let c = Tensor::new(&[IndexType::DOWN]);
/// assert!(add(&a, &c).is_err());
/// ```
pub fn add(a: &Tensor, b: &Tensor) -> Result<Tensor, TensorError> {
    let mut result = a.clone();
    add_inplace(&mut result, b)?;
    Ok(result)
}

/// Add `b` into `a` component-wise, returning `a` for chaining.
///
/// # Errors
///
/// Same as [`add`]; `a` is unchanged on error.
pub fn add_inplace<'a>(a: &'a mut Tensor, b: &Tensor) -> Result<&'a mut Tensor, TensorError> {
    apply_binary_inplace(a, b, |x, y| x + y)?;
    Ok(a)
}

/// `a - b`, defined as `a + (-1)·b`.
///
/// # Errors
///
/// Same as [`add`].
pub fn sub(a: &Tensor, b: &Tensor) -> Result<Tensor, TensorError> {
    add(a, &scale(b, -1.0))
}

/// Subtract `b` from `a` in-place, returning `a` for chaining.
///
/// # Errors
///
/// Same as [`add`]; `a` is unchanged on error.
pub fn sub_inplace<'a>(a: &'a mut Tensor, b: &Tensor) -> Result<&'a mut Tensor, TensorError> {
    add_inplace(a, &scale(b, -1.0))
}

/// Combine two tensors with identical index types element-wise.
///
/// # Example
///
/// ```
/// use pointtensor::{IndexType, Tensor};
/// use pointtensor::operations::apply_binary;
///
/// let a = Tensor::from_vec(&[IndexType::DOWN], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Tensor::from_vec(&[IndexType::DOWN], vec![4.0, 5.0, 6.0, 7.0]).unwrap();
/// let c = apply_binary(&a, &b, |x, y| x * y).unwrap();
/// assert_eq!(c.components(), &[4.0, 10.0, 18.0, 28.0]);
/// ```
pub fn apply_binary<F>(a: &Tensor, b: &Tensor, f: F) -> Result<Tensor, TensorError>
where
    F: Fn(f64, f64) -> f64,
{
    let mut result = a.clone();
    apply_binary_inplace(&mut result, b, f)?;
    Ok(result)
}

fn apply_binary_inplace<F>(a: &mut Tensor, b: &Tensor, f: F) -> Result<(), TensorError>
where
    F: Fn(f64, f64) -> f64,
{
    if a.types() != b.types() {
        return Err(TensorError::RankMismatch {
            expected: a.types().to_vec(),
            actual: b.types().to_vec(),
        });
    }
    for (x, &y) in a.components_mut().iter_mut().zip(b.components()) {
        *x = f(*x, y);
    }
    Ok(())
}

impl Mul<f64> for &Tensor {
    type Output = Tensor;

    fn mul(self, alpha: f64) -> Tensor {
        scale(self, alpha)
    }
}

impl Mul<f64> for Tensor {
    type Output = Tensor;

    fn mul(mut self, alpha: f64) -> Tensor {
        scale_inplace(&mut self, alpha);
        self
    }
}

impl Mul<&Tensor> for f64 {
    type Output = Tensor;

    fn mul(self, tensor: &Tensor) -> Tensor {
        scale(tensor, self)
    }
}

impl Mul<Tensor> for f64 {
    type Output = Tensor;

    fn mul(self, tensor: Tensor) -> Tensor {
        tensor * self
    }
}

impl MulAssign<f64> for Tensor {
    fn mul_assign(&mut self, alpha: f64) {
        scale_inplace(self, alpha);
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        scale(self, -1.0)
    }
}

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        self * -1.0
    }
}
