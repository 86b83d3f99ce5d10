//! Post-quantum signature schemes

pub mod mldsa;

pub use mldsa::{MlDsa44, MlDsa44Aes, MlDsa65, MlDsa65Aes, MlDsa87, MlDsa87Aes};
