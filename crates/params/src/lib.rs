//! Constants and parameter sets for the mldsa library.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod pqc;
