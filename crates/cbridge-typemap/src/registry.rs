//! Ordered type registry and the pipe-table format.
//!
//! The table format is one entry per line, fields separated by `|`:
//!
//! ```text
//! C | unsigned long long | unsigned | integer
//! ```
//!
//! Blank lines are skipped. A trailing empty field (from a line ending in
//! `|`) is tolerated. Entry order is preserved end to end: it becomes the
//! probe program's output order, and earlier entries are preferred when two
//! spellings name the same underlying type.

use crate::descriptor::{Interpretation, TypeDescriptor};
use crate::error::{Result, TypemapError};

/// Built-in registry table covering the standard C arithmetic types.
const BUILTIN_TABLE: &str = "
    C | char               | signed   | integer
    C | float              | signed   | float
    C | double             | signed   | float
    C | int                | signed   | integer
    C | long double        | signed   | float
    C | short              | signed   | integer
    C | long               | signed   | integer
    C | long long          | signed   | integer
    C | unsigned char      | unsigned | integer
    C | unsigned int       | unsigned | integer
    C | unsigned long      | unsigned | integer
    C | unsigned long long | unsigned | integer
    C | unsigned short     | unsigned | integer
";

/// An insertion-ordered collection of `(TypeDescriptor, Interpretation)`
/// pairs, unique by `(type_system, type_name)`.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<(TypeDescriptor, Interpretation)>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// The built-in C arithmetic type registry.
    pub fn builtin() -> Self {
        // The built-in table is a compile-time constant; parsing it cannot fail.
        Registry::parse(BUILTIN_TABLE).expect("builtin table is well-formed")
    }

    /// Parse a registry from the pipe-table format.
    pub fn parse(table: &str) -> Result<Self> {
        let mut registry = Registry::new();

        for (index, raw) in table.lines().enumerate() {
            let line = index + 1;
            let row = raw.trim();
            if row.is_empty() {
                continue;
            }

            let mut fields: Vec<&str> = row.split('|').map(str::trim).collect();
            if fields.len() == 5 && fields[4].is_empty() {
                fields.pop();
            }
            if fields.len() != 4 {
                return Err(TypemapError::InvalidTable {
                    line,
                    detail: format!("expected 4 fields, found {}", fields.len()),
                });
            }

            let [system, name, signage, kind] = [fields[0], fields[1], fields[2], fields[3]];
            if system.is_empty() || name.is_empty() {
                return Err(TypemapError::InvalidTable {
                    line,
                    detail: "type system and type name must be non-empty".to_string(),
                });
            }

            let descriptor = TypeDescriptor::new(system, name);
            let interpretation = Interpretation::new(signage.parse()?, kind.parse()?);

            registry.insert(descriptor, interpretation).map_err(|e| match e {
                TypemapError::InvalidTable { detail, .. } => {
                    TypemapError::InvalidTable { line, detail }
                }
                other => other,
            })?;
        }

        Ok(registry)
    }

    /// Append an entry, rejecting duplicate `(type_system, type_name)` pairs.
    pub fn insert(
        &mut self,
        descriptor: TypeDescriptor,
        interpretation: Interpretation,
    ) -> Result<()> {
        if self.entries.iter().any(|(d, _)| *d == descriptor) {
            return Err(TypemapError::InvalidTable {
                line: 0,
                detail: format!(
                    "duplicate entry ({}, {})",
                    descriptor.type_system, descriptor.type_name
                ),
            });
        }
        self.entries.push((descriptor, interpretation));
        Ok(())
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(TypeDescriptor, Interpretation)] {
        &self.entries
    }

    /// Entries belonging to one type system, in insertion order.
    pub fn entries_for_system<'a>(
        &'a self,
        type_system: &'a str,
    ) -> impl Iterator<Item = &'a (TypeDescriptor, Interpretation)> {
        self.entries
            .iter()
            .filter(move |(d, _)| d.type_system == type_system)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{NumericKind, Signage};

    #[test]
    fn builtin_is_well_formed() {
        let registry = Registry::builtin();
        assert!(!registry.is_empty());
        assert!(registry
            .entries()
            .iter()
            .all(|(d, _)| d.type_system == "C" && !d.type_name.is_empty()));
    }

    #[test]
    fn parse_preserves_order() {
        let registry = Registry::parse(
            "
            posix | long      | signed   | integer
            posix | size_t    | unsigned | integer
            C     | double    | signed   | float
            ",
        )
        .unwrap();

        let names: Vec<&str> = registry
            .entries()
            .iter()
            .map(|(d, _)| d.type_name.as_str())
            .collect();
        assert_eq!(names, ["long", "size_t", "double"]);
        assert_eq!(registry.entries()[1].1.signage, Signage::Unsigned);
        assert_eq!(registry.entries()[2].1.numeric_kind, NumericKind::Floating);
    }

    #[test]
    fn parse_tolerates_trailing_separator() {
        let registry = Registry::parse("C | char | signed | integer |").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn parse_rejects_wrong_arity() {
        let err = Registry::parse("C | char | signed").unwrap_err();
        match err {
            TypemapError::InvalidTable { line, .. } => assert_eq!(line, 1),
            other => panic!("expected InvalidTable, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_unknown_tag() {
        assert!(Registry::parse("C | char | wobbly | integer").is_err());
    }

    #[test]
    fn parse_rejects_duplicates() {
        let table = "
            C | int | signed | integer
            C | int | signed | integer
        ";
        let err = Registry::parse(table).unwrap_err();
        match err {
            TypemapError::InvalidTable { line, detail } => {
                assert_eq!(line, 3);
                assert!(detail.contains("duplicate"));
            }
            other => panic!("expected InvalidTable, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_empty_name() {
        assert!(Registry::parse("C |  | signed | integer").is_err());
    }

    #[test]
    fn entries_for_system_filters() {
        let registry = Registry::parse(
            "
            C     | int  | signed | integer
            posix | long | signed | integer
            C     | char | signed | integer
            ",
        )
        .unwrap();

        let c_names: Vec<&str> = registry
            .entries_for_system("C")
            .map(|(d, _)| d.type_name.as_str())
            .collect();
        assert_eq!(c_names, ["int", "char"]);
    }
}
