//! Internal utilities shared by the mldsa crates.
//!
//! Nothing in here is part of the stable public API.

#![forbid(unsafe_code)]

pub mod constant_time;

pub use constant_time::{ct_abs_i32, ct_eq};
