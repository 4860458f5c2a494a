//! Function and variable models for generated modules.
//!
//! A [`Function`] owns a signature and a body and can render itself three
//! ways: as a declaration line, as a full definition block, or as a
//! `c_`-prefixed forwarding wrapper for the C-linkage boundary.

use crate::ctype::{CParam, CSignature, CType};
use crate::error::Result;

/// A top-level variable in a generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub ctype: CType,
    pub initializer: Option<String>,
    pub is_constant: bool,
}

impl Variable {
    pub fn new(
        name: impl Into<String>,
        ctype: CType,
        initializer: Option<String>,
        is_constant: bool,
    ) -> Self {
        Variable {
            name: name.into(),
            ctype,
            initializer,
            is_constant,
        }
    }

    /// Render the standalone declaration line.
    pub fn render_declaration(&self) -> String {
        let qualifier = if self.is_constant { " const" } else { "" };
        match &self.initializer {
            Some(init) => format!("{}{} {} = {};", self.ctype, qualifier, self.name, init),
            None => format!("{}{} {};", self.ctype, qualifier, self.name),
        }
    }
}

/// A function definition in a generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub return_type: CType,
    pub params: Vec<CParam>,
    /// Body lines, already dedented, without the surrounding braces.
    pub body: Vec<String>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        return_type: CType,
        params: Vec<CParam>,
        body: &str,
    ) -> Self {
        Function {
            name: name.into(),
            return_type,
            params,
            body: dedent_lines(body),
        }
    }

    /// Build a function from a C signature string and a body.
    pub fn from_signature(signature: &str, body: &str) -> Result<Self> {
        let sig = CSignature::parse(signature)?;
        Ok(Function::new(sig.name, sig.return_type, sig.params, body))
    }

    /// Render the argument list. `with_types` gives a declaration-style list,
    /// `with_names` alone gives a call-style list.
    fn render_arguments(&self, with_names: bool, with_types: bool) -> String {
        self.params
            .iter()
            .map(|p| match (with_types, with_names && !p.name.is_empty()) {
                (true, true) => format!("{} {}", p.ctype, p.name),
                (true, false) => p.ctype.to_string(),
                (false, _) => p.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render the signature; without types this is a call expression.
    pub fn render_signature(&self, with_names: bool, with_types: bool) -> String {
        let arguments = self.render_arguments(with_names, with_types);
        if with_types {
            format!("{} {}({})", self.return_type, self.name, arguments)
        } else {
            format!("{}({})", self.name, arguments)
        }
    }

    /// Render the `signature;` declaration line.
    pub fn render_declaration(&self) -> String {
        format!("{};", self.render_signature(true, true))
    }

    /// Render the full definition block with a four-space indented body.
    pub fn render_definition(&self) -> String {
        let mut out = self.render_signature(true, true);
        out.push_str(" {\n");
        for line in &self.body {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('}');
        out
    }

    /// Build the C-linkage wrapper that forwards to this function.
    ///
    /// The wrapper shares signature shape and calls through with bare argument
    /// names, so the wrapped function keeps internal linkage freedom. Unnamed
    /// parameters get positional names so the forwarded call stays complete.
    pub fn forwarding_interface(&self, name: Option<&str>) -> Function {
        let wrapper_name = match name {
            Some(n) => n.to_string(),
            None => format!("c_{}", self.name),
        };
        let params: Vec<CParam> = self
            .params
            .iter()
            .enumerate()
            .map(|(index, p)| CParam {
                ctype: p.ctype.clone(),
                name: if p.name.is_empty() {
                    format!("arg{index}")
                } else {
                    p.name.clone()
                },
            })
            .collect();
        let arguments = params
            .iter()
            .map(|p| p.name.clone())
            .collect::<Vec<_>>()
            .join(", ");
        Function {
            name: wrapper_name,
            return_type: self.return_type.clone(),
            params,
            body: vec![format!("return {}({arguments});", self.name)],
        }
    }
}

/// Split a body into lines with the common leading whitespace removed.
///
/// Leading and trailing blank lines are dropped; interior blank lines are
/// kept. The common prefix is the minimum leading-whitespace character count
/// over non-empty lines, so bodies written as indented Rust string literals
/// come out flush-left.
pub fn dedent_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .skip_while(|line| line.is_empty())
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let prefix = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                // Every non-empty line starts with at least `prefix`
                // whitespace characters.
                line.chars().skip(prefix).collect()
            }
        })
        .collect()
}
