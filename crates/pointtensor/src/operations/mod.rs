//! Tensor operations.
//!
//! Each operation is a free function returning a new tensor; in-place forms
//! mutate only their receiver and leave it untouched on error.
//!
//! ```text
//! elementwise   scale, add, sub (+ in-place forms, std::ops for scalars)
//! outer         outer product, multiply = outer + contract_labels
//! permute       permute_indices, align_to, label_permutation
//! ```

mod elementwise;
mod outer;
mod permute;

pub use elementwise::{
    add, add_inplace, apply_binary, scale, scale_inplace, sub, sub_inplace,
};
pub use outer::{multiply, outer, outer_into};
pub use permute::{align_to, label_permutation, permute_indices};
