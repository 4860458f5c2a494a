//! Template renderer and size-probe generator for cbridge.
//!
//! Turns declarative module descriptions into paired C-linkage header/module
//! source files, and type registries into size-probe programs whose output
//! reports the native byte width of every registered type.
//!
//! ## Modules
//!
//! - [`ctype`] — C type model and signature parsing
//! - [`context`] — The statically-typed rendering context
//! - [`template`] — The shared header/module rendering engine
//! - [`function`] — Function and variable models
//! - [`module`] — Module builder producing header/module pairs
//! - [`declaration`] — `.bridge.toml` declaration file parsing
//! - [`probe`] — Size probe program generation
//! - [`bytearray`] — The fixed byte-array boundary assets

pub mod bytearray;
pub mod context;
pub mod ctype;
pub mod declaration;
pub mod error;
pub mod function;
pub mod module;
pub mod probe;
pub mod template;

// Re-export key types for convenience
pub use context::TemplateContext;
pub use ctype::{CParam, CSignature, CType};
pub use declaration::BridgeDeclaration;
pub use error::CodegenError;
pub use function::{Function, Variable};
pub use module::ModuleBuilder;
pub use probe::generate_probe;
pub use template::{render, TemplateKind};
