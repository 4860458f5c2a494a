//! Bridge declaration file (`.bridge.toml`) parsing.
//!
//! A `.bridge.toml` file declares one bridged module: its includes, structure
//! definitions, module variables, and the functions exposed across the
//! C-linkage boundary.
//!
//! ```toml
//! structures = ["struct Color { float r; float g; float b; float a; };"]
//!
//! [module]
//! name = "shader"
//! header = "shader.hpp"
//!
//! [[headers]]
//! name = "<cmath>"
//! module-only = false
//!
//! [[variables]]
//! name = "black"
//! type = "Color"
//! initializer = "{ 0., 0., 0., 1. }"
//! constant = true
//!
//! [[functions]]
//! signature = "Color sample_texture(Vertex mesh, float s, float t)"
//! body = "return black;"
//! ```

use serde::{Deserialize, Serialize};

use crate::ctype::CType;
use crate::error::{CodegenError, Result};
use crate::function::{Function, Variable};
use crate::module::ModuleBuilder;

/// A complete bridge declaration parsed from a `.bridge.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeDeclaration {
    /// Metadata about the generated module.
    pub module: ModuleSection,
    /// Include targets.
    #[serde(default)]
    pub headers: Vec<HeaderEntry>,
    /// Structure definition fragments, emitted in order.
    #[serde(default)]
    pub structures: Vec<String>,
    /// Module-level variables.
    #[serde(default)]
    pub variables: Vec<VariableEntry>,
    /// Function definitions; exported ones get a forwarding interface.
    #[serde(default)]
    pub functions: Vec<FunctionEntry>,
}

/// The `[module]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSection {
    /// Module name; becomes the output file stem.
    pub name: String,
    /// Generated header file name. When set, the module file includes it and
    /// structure definitions appear only in the header.
    #[serde(default)]
    pub header: Option<String>,
}

/// One include target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// Target as spelled after `#include` (e.g. `<cmath>`).
    pub name: String,
    /// Includes default to the module file only; header-file includes opt in.
    #[serde(default = "default_true", rename = "module-only", alias = "module_only")]
    pub module_only: bool,
}

/// One `[[variables]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableEntry {
    pub name: String,
    /// C type spelling (e.g. `"float"`, `"Color"`).
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub initializer: Option<String>,
    #[serde(default)]
    pub constant: bool,
}

/// One `[[functions]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionEntry {
    /// C signature string (e.g. `"double sin(double x)"`).
    pub signature: String,
    /// Function body, dedented before rendering.
    #[serde(default)]
    pub body: String,
    /// Whether to expose a forwarding interface across the boundary.
    #[serde(default = "default_true")]
    pub export: bool,
    /// Override for the forwarding interface name (default `c_<name>`).
    #[serde(default, rename = "interface-name", alias = "interface_name")]
    pub interface_name: Option<String>,
}

fn default_true() -> bool {
    true
}

impl BridgeDeclaration {
    /// Parse a bridge declaration from a TOML string.
    pub fn parse(input: &str) -> Result<Self> {
        let decl: BridgeDeclaration = toml::from_str(input)?;

        if decl.module.name.trim().is_empty() {
            return Err(CodegenError::InvalidDeclaration {
                detail: "module.name is required".to_string(),
            });
        }
        if let Some(header) = &decl.module.header {
            if header.trim().is_empty() {
                return Err(CodegenError::InvalidDeclaration {
                    detail: "module.header must be non-empty when present".to_string(),
                });
            }
        }

        Ok(decl)
    }

    /// Parse a bridge declaration from a file path.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Wire the declaration into a module builder.
    pub fn to_builder(&self) -> Result<ModuleBuilder> {
        let mut builder = match &self.module.header {
            Some(header) => ModuleBuilder::with_header(header.clone()),
            None => ModuleBuilder::new(),
        };

        for header in &self.headers {
            builder.add_header(header.name.clone(), header.module_only);
        }
        for structure in &self.structures {
            builder.add_structure(structure.clone());
        }
        for variable in &self.variables {
            let ctype = CType::parse(&variable.type_name)?;
            builder.add_variable(Variable::new(
                variable.name.clone(),
                ctype,
                variable.initializer.clone(),
                variable.constant,
            ));
        }
        for entry in &self.functions {
            let function = Function::from_signature(&entry.signature, &entry.body)?;
            if entry.export {
                match &entry.interface_name {
                    Some(name) => {
                        builder
                            .add_interface(function.forwarding_interface(Some(name)));
                        builder.add_function(function);
                    }
                    None => builder.export(function),
                }
            } else {
                builder.add_function(function);
            }
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHADER_DECL: &str = r#"
structures = [
    "struct Color { float r; float g; float b; float a; };",
    "struct Vertex { Color color; };",
]

[module]
name = "shader"
header = "shader.hpp"

[[headers]]
name = "<vector>"

[[headers]]
name = "<cmath>"
module-only = false

[[variables]]
name = "black"
type = "Color"
initializer = "{ 0., 0., 0., 1. }"
constant = true

[[variables]]
name = "shader_time"
type = "float"
initializer = "0"

[[functions]]
signature = "Color sample_texture(Vertex mesh, float s, float t)"
body = "return black;"
"#;

    #[test]
    fn parse_shader_declaration() {
        let decl = BridgeDeclaration::parse(SHADER_DECL).unwrap();
        assert_eq!(decl.module.name, "shader");
        assert_eq!(decl.module.header.as_deref(), Some("shader.hpp"));
        assert_eq!(decl.headers.len(), 2);
        assert!(decl.headers[0].module_only);
        assert!(!decl.headers[1].module_only);
        assert_eq!(decl.structures.len(), 2);
        assert_eq!(decl.variables.len(), 2);
        assert!(decl.variables[0].constant);
        assert!(!decl.variables[1].constant);
        assert_eq!(decl.functions.len(), 1);
        assert!(decl.functions[0].export);
    }

    #[test]
    fn shader_pair_renders_end_to_end() {
        let decl = BridgeDeclaration::parse(SHADER_DECL).unwrap();
        let builder = decl.to_builder().unwrap();

        let header = builder.render_header();
        assert!(header.contains("#include <cmath>"));
        assert!(!header.contains("#include <vector>"));
        assert!(header.contains("extern \"C\" struct Color"));
        assert!(header
            .contains("Color c_sample_texture(Vertex mesh, float s, float t);"));

        let module = builder.render_module();
        assert!(module.starts_with("#include \"shader.hpp\""));
        assert!(module.contains("#include <vector>"));
        assert!(!module.contains("struct Color {"));
        assert!(module.contains("Color const black = { 0., 0., 0., 1. };"));
        assert!(module.contains("float shader_time = 0;"));
        assert!(module.contains("return sample_texture(mesh, s, t);"));
    }

    #[test]
    fn minimal_declaration() {
        let decl = BridgeDeclaration::parse("[module]\nname = \"tiny\"\n").unwrap();
        assert_eq!(decl.module.name, "tiny");
        assert!(decl.module.header.is_none());
        assert!(decl.functions.is_empty());
        let builder = decl.to_builder().unwrap();
        assert_eq!(builder.render_header(), "extern \"C\" {\n}\n");
    }

    #[test]
    fn missing_module_name_rejected() {
        assert!(BridgeDeclaration::parse("[module]\nname = \"\"\n").is_err());
        assert!(BridgeDeclaration::parse("headers = []\n").is_err());
    }

    #[test]
    fn unexported_function_stays_internal() {
        let decl = BridgeDeclaration::parse(
            r#"
[module]
name = "internal"

[[functions]]
signature = "int helper(int x)"
body = "return x * 2;"
export = false
"#,
        )
        .unwrap();
        let builder = decl.to_builder().unwrap();
        let header = builder.render_header();
        assert!(!header.contains("helper"));
        let module = builder.render_module();
        assert!(module.contains("int helper(int x) {"));
        assert!(!module.contains("c_helper"));
    }

    #[test]
    fn custom_interface_name() {
        let decl = BridgeDeclaration::parse(
            r#"
[module]
name = "custom"

[[functions]]
signature = "void ping(void)"
interface-name = "bridge_ping"
"#,
        )
        .unwrap();
        let builder = decl.to_builder().unwrap();
        assert!(builder.render_header().contains("void bridge_ping();"));
    }

    #[test]
    fn exported_unnamed_parameters_forward_completely() {
        let decl = BridgeDeclaration::parse(
            r#"
[module]
name = "wrapped_math"

[[functions]]
signature = "float sqrtf(float)"
body = "return 0.f;"
"#,
        )
        .unwrap();
        let module = decl.to_builder().unwrap().render_module();
        assert!(module.contains("float c_sqrtf(float arg0) {"));
        assert!(module.contains("return sqrtf(arg0);"));
    }

    #[test]
    fn bad_signature_surfaces_parse_error() {
        let decl = BridgeDeclaration::parse(
            r#"
[module]
name = "broken"

[[functions]]
signature = "not a signature"
"#,
        )
        .unwrap();
        assert!(matches!(
            decl.to_builder(),
            Err(CodegenError::InvalidSignature { .. })
        ));
    }
}
