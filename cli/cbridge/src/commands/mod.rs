//! CLI command implementations.

pub mod bytearray;
pub mod generate;
pub mod probe;
