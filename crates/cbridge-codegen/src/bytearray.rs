//! The fixed byte-array boundary module.
//!
//! Generated modules move variable-length buffers across the boundary through
//! the `ByteArray` structure and its `byte_array_alloc`/`byte_array_free`
//! pair. The pair of source files is pre-written and shipped verbatim as an
//! asset; the generator depends on it but never regenerates it.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name of the byte-array declarations file.
pub const HEADER_FILE: &str = "byte_array.hpp";
/// File name of the byte-array definitions file.
pub const MODULE_FILE: &str = "byte_array.cpp";

/// Contents of `byte_array.hpp`.
pub const HEADER: &str = include_str!("../assets/byte_array.hpp");
/// Contents of `byte_array.cpp`.
pub const MODULE: &str = include_str!("../assets/byte_array.cpp");

/// Write the byte-array pair into `dir`, creating it if needed.
///
/// Returns the paths of the written header and module files.
pub fn write_assets(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let header_path = dir.join(HEADER_FILE);
    let module_path = dir.join(MODULE_FILE);
    std::fs::write(&header_path, HEADER)?;
    std::fs::write(&module_path, MODULE)?;
    Ok((header_path, module_path))
}
