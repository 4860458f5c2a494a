//! `cbridge bytearray` — write the byte-array boundary pair.

use std::path::Path;

use anyhow::{Context, Result};

use cbridge_codegen::bytearray::write_assets;

/// Write `byte_array.hpp` and `byte_array.cpp` into `out_dir`.
pub fn run(out_dir: &Path) -> Result<()> {
    let (header_path, module_path) = write_assets(out_dir)
        .with_context(|| format!("writing byte-array pair to {}", out_dir.display()))?;
    println!("Generated {}", header_path.display());
    println!("Generated {}", module_path.display());
    Ok(())
}
