//! Constants for post-quantum algorithms

pub mod mldsa;
