//! Module builder: collects the pieces of one bridged module and renders the
//! paired declarations/definitions files through the template engine.

use crate::context::TemplateContext;
use crate::function::{Function, Variable};
use crate::template::{render, TemplateKind};

/// One `#include` target, optionally restricted to the definitions file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Include target as it appears after `#include` (e.g. `<cmath>`).
    pub name: String,
    /// When true the include appears only in the module file.
    pub module_only: bool,
}

/// Accumulates headers, structures, variables, functions, and boundary
/// interfaces for one generated module.
#[derive(Debug, Clone, Default)]
pub struct ModuleBuilder {
    /// When set, the module includes this generated header and leaves
    /// structure definitions to it.
    header_name: Option<String>,
    headers: Vec<Header>,
    structures: Vec<String>,
    variables: Vec<Variable>,
    functions: Vec<Function>,
    interfaces: Vec<Function>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        ModuleBuilder::default()
    }

    /// A builder whose module file includes the named generated header.
    pub fn with_header(header_name: impl Into<String>) -> Self {
        ModuleBuilder {
            header_name: Some(header_name.into()),
            ..ModuleBuilder::default()
        }
    }

    /// Add an include target. Re-adding a name updates its `module_only`
    /// flag; insertion order of first occurrence is kept.
    pub fn add_header(&mut self, name: impl Into<String>, module_only: bool) {
        let name = name.into();
        match self.headers.iter_mut().find(|h| h.name == name) {
            Some(existing) => existing.module_only = module_only,
            None => self.headers.push(Header { name, module_only }),
        }
    }

    /// Add a structure definition fragment.
    pub fn add_structure(&mut self, definition: impl Into<String>) {
        self.structures.push(definition.into());
    }

    pub fn add_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    /// Add a boundary interface directly (already a complete function).
    pub fn add_interface(&mut self, interface: Function) {
        self.interfaces.push(interface);
    }

    /// Add a function definition together with its default forwarding
    /// interface across the C-linkage boundary.
    pub fn export(&mut self, function: Function) {
        self.interfaces.push(function.forwarding_interface(None));
        self.functions.push(function);
    }

    /// Render the declarations file.
    pub fn render_header(&self) -> String {
        let context = TemplateContext {
            headers: self
                .headers
                .iter()
                .filter(|h| !h.module_only)
                .map(|h| h.name.clone())
                .collect(),
            structures: dedup_preserving_order(&self.structures),
            variable_declarations: Vec::new(),
            functions: Vec::new(),
            interfaces: self
                .interfaces
                .iter()
                .map(Function::render_declaration)
                .collect(),
        };
        render(TemplateKind::Header, &context)
    }

    /// Render the definitions file.
    pub fn render_module(&self) -> String {
        let mut headers: Vec<String> = self.headers.iter().map(|h| h.name.clone()).collect();

        // Structures live in the generated header when there is one.
        let structures = match &self.header_name {
            Some(name) => {
                let target = include_target(name);
                if !headers.contains(&target) {
                    headers.insert(0, target);
                }
                Vec::new()
            }
            None => dedup_preserving_order(&self.structures),
        };

        let context = TemplateContext {
            headers,
            structures,
            variable_declarations: self
                .variables
                .iter()
                .map(Variable::render_declaration)
                .collect(),
            functions: self.functions.iter().map(Function::render_definition).collect(),
            interfaces: self
                .interfaces
                .iter()
                .map(Function::render_definition)
                .collect(),
        };
        render(TemplateKind::Module, &context)
    }
}

/// Quote a bare header file name; leave `<...>` and `"..."` targets alone.
fn include_target(name: &str) -> String {
    if name.starts_with('<') || name.starts_with('"') {
        name.to_string()
    } else {
        format!("\"{name}\"")
    }
}

/// First occurrence wins; order preserved.
fn dedup_preserving_order(fragments: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for fragment in fragments {
        if !seen.contains(fragment) {
            seen.push(fragment.clone());
        }
    }
    seen
}
