//! pointtensor - tensor algebra at a point of four-dimensional spacetime
//!
//! A [`Tensor`] holds the `4^rank` components of a tensor at one point,
//! together with the variance ([`IndexType`]) of each index and an optional
//! abstract [`Label`] per index for the Einstein summation convention.
//!
//! # Architecture
//!
//! ```text
//! codec        multi-index ⇄ flat offset (row-major, base 4)
//!   ↓
//! storage      Dense: 4^rank f64
//!   ↓
//! contract     positional trace, label-driven trace
//!   ↓
//! operations   scale, add/sub, outer, multiply (= outer + label trace)
//! ```
//!
//! # Example
//!
//! ```
//! use pointtensor::{IndexType, Tensor};
//! use pointtensor::operations::multiply;
//!
//! // Kronecker delta δ^a_b
//! let mut delta = Tensor::new(&[IndexType::UP, IndexType::DOWN]);
//! for i in 0..4 {
//!     delta.set(&[i, i], 1.0).unwrap();
//! }
//!
//! // δ^a_a = 4
//! let trace = delta.label(&['a', 'a']).unwrap();
//! assert_eq!(trace.value(), Some(4.0));
//!
//! // δ^a_b v^b = v^a
//! let v = Tensor::from_vec(&[IndexType::UP], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let w = multiply(
//!     &delta.label(&['a', 'b']).unwrap(),
//!     &v.label(&['b']).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(w.components(), v.components());
//! ```

pub mod codec;
pub mod contract;
pub mod error;
pub mod index_type;
pub mod label;
pub mod operations;
pub mod storage;
pub mod tensor;
pub mod tensor_list;

pub use codec::{DIMENSION, MultiIndex};
pub use contract::{contract, contract_labels};
pub use error::{ErrorKind, TensorError};
pub use index_type::{IndexType, parse_index_types};
pub use label::{Label, LabelSpec};
pub use storage::Dense;
pub use tensor::Tensor;
pub use tensor_list::TensorList;
