//! Test support for the mldsa workspace
//!
//! Holds the deterministic random generator used by the NIST known-answer
//! harness and the JSON vector loader shared by the integration tests under
//! `tests/`.

#![forbid(unsafe_code)]

pub mod kat;
pub mod vectors;

pub use kat::KatDrbg;
pub use vectors::{load_kat_vectors, DrbgVector, KatFile, KatVector};
