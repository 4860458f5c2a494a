//! Template rendering context.
//!
//! A [`TemplateContext`] is the complete, statically-typed input to the
//! renderer: five insertion-ordered sequences of pre-formatted source
//! fragments. The renderer never parses fragment contents; it only places
//! them. Order is semantically significant and becomes output order.

use serde::Deserialize;

use crate::error::{CodegenError, Result};

/// Ordered source fragments for one header/module pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    /// `#include` targets, e.g. `<stdio.h>` or `"shader.hpp"`.
    pub headers: Vec<String>,
    /// Structure definitions, each a complete `struct ... ;` fragment.
    pub structures: Vec<String>,
    /// Top-level variable declaration lines.
    pub variable_declarations: Vec<String>,
    /// Complete function definition blocks.
    pub functions: Vec<String>,
    /// Function signatures exposed across the C-linkage boundary.
    pub interfaces: Vec<String>,
}

/// Raw document form: every sequence field must be present (empty is fine,
/// absent is not).
#[derive(Debug, Deserialize)]
struct RawContext {
    headers: Option<Vec<String>>,
    structures: Option<Vec<String>>,
    variable_declarations: Option<Vec<String>>,
    functions: Option<Vec<String>>,
    interfaces: Option<Vec<String>>,
}

impl TemplateContext {
    /// Parse a context document from TOML, requiring all five sequence fields.
    pub fn from_toml(input: &str) -> Result<Self> {
        let raw: RawContext = toml::from_str(input)?;

        let required = |field: &'static str, value: Option<Vec<String>>| {
            value.ok_or(CodegenError::MalformedContext { field })
        };

        Ok(TemplateContext {
            headers: required("headers", raw.headers)?,
            structures: required("structures", raw.structures)?,
            variable_declarations: required(
                "variable_declarations",
                raw.variable_declarations,
            )?,
            functions: required("functions", raw.functions)?,
            interfaces: required("interfaces", raw.interfaces)?,
        })
    }
}
