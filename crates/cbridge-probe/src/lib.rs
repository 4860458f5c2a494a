//! Size probe runner for cbridge.
//!
//! Type sizes are compile-time facts of the native toolchain, so cbridge asks
//! the toolchain directly: generate a probe program, compile it, run it, and
//! parse the size report it prints. This crate owns the compile-and-run half
//! of that handshake.

pub mod error;
pub mod runner;

pub use error::ProbeError;
pub use runner::ProbeRunner;
