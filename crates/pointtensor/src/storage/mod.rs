//! Storage for tensor components.
//!
//! A tensor at a point always holds every one of its `4^rank` components,
//! so the only layout is [`Dense`]. Storage is a flat vector; rank, index
//! types and labels live on the [`Tensor`](crate::Tensor) wrapper.

mod dense;

pub use dense::Dense;
