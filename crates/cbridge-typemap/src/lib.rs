//! Cross-language type registry and size-report data model for cbridge.
//!
//! A [`Registry`] is an ordered list of type descriptors paired with
//! interpretation descriptors. The probe generator turns a registry into a
//! native program; the probe runner turns that program's output back into
//! [`SizeRecord`]s via [`report`].
//!
//! ## Modules
//!
//! - [`descriptor`] — Type and interpretation descriptors
//! - [`registry`] — Ordered registry with the pipe-table parser
//! - [`report`] — Size-report wire format (JSON array of arrays)

pub mod descriptor;
pub mod error;
pub mod registry;
pub mod report;

pub use descriptor::{Interpretation, NumericKind, Signage, TypeDescriptor};
pub use error::TypemapError;
pub use registry::Registry;
pub use report::SizeRecord;
