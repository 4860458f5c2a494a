//! `cbridge generate` — render a bridged module pair from a declaration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cbridge_codegen::BridgeDeclaration;

/// Render the header/module pair for a `.bridge.toml` declaration into
/// `out_dir`, returning the written paths.
pub fn run(declaration: &Path, out_dir: &Path) -> Result<()> {
    let (header_path, module_path) = generate_pair(declaration, out_dir)?;
    println!("Generated {}", header_path.display());
    println!("Generated {}", module_path.display());
    Ok(())
}

pub fn generate_pair(declaration: &Path, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let decl = BridgeDeclaration::load(declaration)
        .with_context(|| format!("loading declaration {}", declaration.display()))?;
    let builder = decl.to_builder().with_context(|| {
        format!("building module from {}", declaration.display())
    })?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let header_name = decl
        .module
        .header
        .clone()
        .unwrap_or_else(|| format!("{}.hpp", decl.module.name));
    let header_path = out_dir.join(header_name);
    let module_path = out_dir.join(format!("{}.cpp", decl.module.name));

    fs::write(&header_path, builder.render_header())
        .with_context(|| format!("writing {}", header_path.display()))?;
    fs::write(&module_path, builder.render_module())
        .with_context(|| format!("writing {}", module_path.display()))?;

    Ok((header_path, module_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATH_DECL: &str = r#"
[module]
name = "math_bridge"
header = "math_bridge.hpp"

[[headers]]
name = "<cmath>"

[[functions]]
signature = "double sine(double x)"
body = "return sin(x);"
"#;

    #[test]
    fn generates_named_pair() {
        let dir = tempfile::tempdir().unwrap();
        let decl_path = dir.path().join("math.bridge.toml");
        fs::write(&decl_path, MATH_DECL).unwrap();

        let out = dir.path().join("out");
        let (header_path, module_path) = generate_pair(&decl_path, &out).unwrap();

        assert_eq!(header_path, out.join("math_bridge.hpp"));
        assert_eq!(module_path, out.join("math_bridge.cpp"));

        let header = fs::read_to_string(&header_path).unwrap();
        assert!(header.contains("double c_sine(double x);"));

        let module = fs::read_to_string(&module_path).unwrap();
        assert!(module.starts_with("#include \"math_bridge.hpp\""));
        assert!(module.contains("return sine(x);"));
    }

    #[test]
    fn default_header_name_from_module_name() {
        let dir = tempfile::tempdir().unwrap();
        let decl_path = dir.path().join("tiny.bridge.toml");
        fs::write(&decl_path, "[module]\nname = \"tiny\"\n").unwrap();

        let (header_path, module_path) =
            generate_pair(&decl_path, dir.path()).unwrap();
        assert_eq!(header_path, dir.path().join("tiny.hpp"));
        assert_eq!(module_path, dir.path().join("tiny.cpp"));
    }

    #[test]
    fn missing_declaration_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = generate_pair(&dir.path().join("absent.bridge.toml"), dir.path());
        assert!(result.is_err());
    }
}
