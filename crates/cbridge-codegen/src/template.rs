//! The code-emission engine.
//!
//! Both output kinds go through one rendering path; the differences between
//! them (which sections exist, linkage qualifiers on structures, blank-line
//! spacing) live in a per-kind [`Layout`] value so the two layouts cannot
//! drift apart structurally.

use crate::context::TemplateContext;

/// Which of the paired output files to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Declarations file: includes, qualified structures, interface
    /// signatures.
    Header,
    /// Definitions file: additionally variables and function bodies.
    Module,
}

/// Spacing and section configuration for one template kind.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// Prefix each structure fragment with `extern "C" `.
    qualify_structures: bool,
    /// Blank lines between adjacent structure fragments.
    structure_gap: usize,
    /// Emit the variable-declaration section.
    emit_variables: bool,
    /// Emit the function-definition section.
    emit_functions: bool,
    /// Blank lines between adjacent interface lines.
    interface_gap: usize,
}

impl TemplateKind {
    pub fn layout(self) -> Layout {
        match self {
            TemplateKind::Header => Layout {
                qualify_structures: true,
                structure_gap: 0,
                emit_variables: false,
                emit_functions: false,
                interface_gap: 0,
            },
            TemplateKind::Module => Layout {
                qualify_structures: false,
                structure_gap: 1,
                emit_variables: true,
                emit_functions: true,
                interface_gap: 1,
            },
        }
    }
}

/// Render one output file from a context.
///
/// Sequence order is preserved exactly; separators appear between adjacent
/// elements and never after the last. The `extern "C" { ... }` interface
/// block is emitted exactly once, even when empty.
pub fn render(kind: TemplateKind, context: &TemplateContext) -> String {
    let layout = kind.layout();
    let mut sections: Vec<String> = Vec::new();

    if let Some(includes) = join_block(
        context.headers.iter().map(|h| format!("#include {h}")),
        0,
    ) {
        sections.push(includes);
    }

    let qualifier = if layout.qualify_structures {
        "extern \"C\" "
    } else {
        ""
    };
    if let Some(structures) = join_block(
        context.structures.iter().map(|s| format!("{qualifier}{s}")),
        layout.structure_gap,
    ) {
        sections.push(structures);
    }

    if layout.emit_variables {
        if let Some(variables) = join_block(context.variable_declarations.iter().cloned(), 0) {
            sections.push(variables);
        }
    }

    if layout.emit_functions {
        if let Some(functions) = join_block(context.functions.iter().cloned(), 1) {
            sections.push(functions);
        }
    }

    sections.push(linkage_block(&context.interfaces, layout.interface_gap));

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

/// Join elements with `gap` blank lines between adjacent pairs and nothing
/// trailing the last. Returns `None` for the empty sequence so empty sections
/// disappear entirely.
fn join_block(elements: impl Iterator<Item = String>, gap: usize) -> Option<String> {
    let separator = "\n".repeat(gap + 1);
    let joined = elements.collect::<Vec<_>>().join(&separator);
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// The single shared `extern "C" { ... }` block.
fn linkage_block(interfaces: &[String], gap: usize) -> String {
    let mut block = String::from("extern \"C\" {");
    if let Some(body) = join_block(interfaces.iter().cloned(), gap) {
        block.push('\n');
        block.push_str(&body);
    }
    block.push_str("\n}");
    block
}
