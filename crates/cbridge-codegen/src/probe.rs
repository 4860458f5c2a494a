//! Size probe program generation.
//!
//! The generator cannot know the byte width of a native type — only the
//! native compiler can. So it emits a tiny C program whose `sizeof`
//! expressions make the compiler answer, one JSON report row per registry
//! entry. The program streams rows straight to stdout with `printf`; there is
//! no scratch buffer to overflow.

use cbridge_typemap::{Interpretation, TypeDescriptor};

use crate::error::{CodegenError, Result};

/// Generate a compilable C program that prints the size report for `entries`.
///
/// Report shape: a JSON array of `[type_system, type_name, signage,
/// numeric_kind, byte_size]` rows in entry order, comma after every row
/// except the last.
pub fn generate_probe(entries: &[(TypeDescriptor, Interpretation)]) -> Result<String> {
    for (descriptor, _) in entries {
        check_type_name(&descriptor.type_name)?;
        check_tag(&descriptor.type_system, &descriptor.type_name)?;
    }

    let mut out = String::from("#include <stdio.h>\n\nint main(void) {\n");
    out.push_str("    printf(\"[\\n\");\n");

    let last = entries.len().saturating_sub(1);
    for (index, (descriptor, interpretation)) in entries.iter().enumerate() {
        let comma = if index == last { "" } else { "," };
        out.push_str(&format!(
            "    printf(\"  [ \\\"{system}\\\", \\\"{name}\\\", \\\"{signage}\\\", \\\"{kind}\\\", %zu ]{comma}\\n\", sizeof({name}));\n",
            system = descriptor.type_system,
            name = descriptor.type_name,
            signage = interpretation.signage.tag(),
            kind = interpretation.numeric_kind.tag(),
        ));
    }

    out.push_str("    printf(\"]\\n\");\n");
    out.push_str("    return 0;\n}\n");
    Ok(out)
}

/// A type name must be spellable both inside a string literal and as a
/// `sizeof` operand. Reject rather than escape: an exotic name reaching this
/// point is a registry defect.
fn check_type_name(type_name: &str) -> Result<()> {
    if type_name.trim().is_empty() {
        return Err(CodegenError::InvalidTypeName {
            type_name: type_name.to_string(),
            detail: "empty type name".to_string(),
        });
    }
    if let Some(bad) = type_name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == ' '))
    {
        return Err(CodegenError::InvalidTypeName {
            type_name: type_name.to_string(),
            detail: format!("character '{}' cannot appear in a type name", bad.escape_default()),
        });
    }
    Ok(())
}

/// Type-system tags only travel inside string literals, so the constraint is
/// looser: printable, no quotes or escapes.
fn check_tag(tag: &str, type_name: &str) -> Result<()> {
    if tag.is_empty()
        || tag
            .chars()
            .any(|c| c == '"' || c == '\\' || c == '%' || c.is_control())
    {
        return Err(CodegenError::InvalidTypeName {
            type_name: type_name.to_string(),
            detail: format!("type system tag '{tag}' cannot be embedded in generated source"),
        });
    }
    Ok(())
}
