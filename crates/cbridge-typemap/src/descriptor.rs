//! Type and interpretation descriptors.
//!
//! A [`TypeDescriptor`] names a type as the native compiler spells it, tagged
//! with the type system it belongs to. An [`Interpretation`] says how the
//! foreign runtime should read the bit pattern. The two are independent and
//! combined pairwise by the registry.

use serde::{Deserialize, Serialize};

use crate::error::TypemapError;

/// A named type in some type system.
///
/// Identity is the `(type_system, type_name)` pair; descriptors are immutable
/// once defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Logical type universe this entry belongs to (e.g. "C", "posix").
    pub type_system: String,
    /// Literal spelling of the type as the native compiler understands it.
    pub type_name: String,
}

impl TypeDescriptor {
    pub fn new(type_system: impl Into<String>, type_name: impl Into<String>) -> Self {
        TypeDescriptor {
            type_system: type_system.into(),
            type_name: type_name.into(),
        }
    }
}

/// Whether a type's bit pattern carries a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signage {
    Signed,
    Unsigned,
    /// Signedness does not apply (e.g. opaque or aggregate types).
    #[serde(rename = "none")]
    NotApplicable,
}

impl Signage {
    /// The wire tag used in tables and size reports.
    pub fn tag(self) -> &'static str {
        match self {
            Signage::Signed => "signed",
            Signage::Unsigned => "unsigned",
            Signage::NotApplicable => "none",
        }
    }
}

impl std::str::FromStr for Signage {
    type Err = TypemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signed" => Ok(Signage::Signed),
            "unsigned" => Ok(Signage::Unsigned),
            "none" => Ok(Signage::NotApplicable),
            other => Err(TypemapError::UnknownTag {
                field: "signage",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Signage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// The numeric family a type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    Integer,
    #[serde(rename = "float")]
    Floating,
    Other,
}

impl NumericKind {
    /// The wire tag used in tables and size reports.
    pub fn tag(self) -> &'static str {
        match self {
            NumericKind::Integer => "integer",
            NumericKind::Floating => "float",
            NumericKind::Other => "other",
        }
    }
}

impl std::str::FromStr for NumericKind {
    type Err = TypemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(NumericKind::Integer),
            "float" => Ok(NumericKind::Floating),
            "other" => Ok(NumericKind::Other),
            other => Err(TypemapError::UnknownTag {
                field: "numeric kind",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// How the foreign runtime should interpret a type's bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interpretation {
    pub signage: Signage,
    pub numeric_kind: NumericKind,
}

impl Interpretation {
    pub fn new(signage: Signage, numeric_kind: NumericKind) -> Self {
        Interpretation {
            signage,
            numeric_kind,
        }
    }
}
