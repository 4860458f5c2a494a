//! Compile-and-run execution of size probe programs.
//!
//! The runner is the only component in the system that touches the file
//! system or spawns processes. It is synchronous: one probe at a time, result
//! awaited before the caller proceeds.

use std::path::Path;
use std::process::Command;

use cbridge_codegen::generate_probe;
use cbridge_typemap::{report, Registry, SizeRecord};

use crate::error::{ProbeError, Result};

/// Compiles and executes probe programs with the system C compiler.
#[derive(Debug, Clone)]
pub struct ProbeRunner {
    compiler: String,
}

impl Default for ProbeRunner {
    fn default() -> Self {
        ProbeRunner {
            compiler: "cc".to_string(),
        }
    }
}

impl ProbeRunner {
    pub fn new() -> Self {
        ProbeRunner::default()
    }

    /// Use a specific compiler binary instead of `cc`.
    pub fn with_compiler(compiler: impl Into<String>) -> Self {
        ProbeRunner {
            compiler: compiler.into(),
        }
    }

    /// Probe every entry of `registry` and return its size records in order.
    pub fn run(&self, registry: &Registry) -> Result<Vec<SizeRecord>> {
        let source = generate_probe(registry.entries())?;
        self.run_source(&source)
    }

    /// Compile and execute an already-generated probe program.
    pub fn run_source(&self, source: &str) -> Result<Vec<SizeRecord>> {
        let dir = tempfile::tempdir()?;
        let source_path = dir.path().join("sizeof_probe.c");
        std::fs::write(&source_path, source)?;

        let binary_path = dir.path().join("sizeof_probe");
        self.compile(&source_path, &binary_path)?;

        let output = Command::new(&binary_path).output()?;
        if !output.status.success() {
            return Err(ProbeError::ExecFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(report::parse_report(&stdout)?)
    }

    fn compile(&self, source_path: &Path, binary_path: &Path) -> Result<()> {
        let output = Command::new(&self.compiler)
            .arg("-o")
            .arg(binary_path)
            .arg(source_path)
            .output()
            .map_err(|e| ProbeError::LaunchFailed {
                compiler: self.compiler.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ProbeError::CompileFailed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbridge_typemap::{NumericKind, Signage};

    #[test]
    fn probe_builtin_registry() {
        let registry = Registry::builtin();
        let records = ProbeRunner::new().run(&registry).unwrap();

        assert_eq!(records.len(), registry.len());

        // Round-trip: submitted tuples come back in order.
        for (record, (descriptor, interpretation)) in records.iter().zip(registry.entries()) {
            assert_eq!(&record.descriptor(), descriptor);
            assert_eq!(&record.interpretation(), interpretation);
            assert!(record.byte_size > 0);
        }
    }

    #[test]
    fn probe_reports_platform_long_size() {
        let registry = Registry::parse("posix | long | signed | integer").unwrap();
        let records = ProbeRunner::new().run(&registry).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.type_system, "posix");
        assert_eq!(record.type_name, "long");
        assert_eq!(record.signage, Signage::Signed);
        assert_eq!(record.numeric_kind, NumericKind::Integer);
        assert_eq!(
            record.byte_size,
            std::mem::size_of::<std::os::raw::c_long>() as u64
        );
    }

    #[test]
    fn char_is_one_byte_everywhere() {
        let registry = Registry::parse("C | char | signed | integer").unwrap();
        let records = ProbeRunner::new().run(&registry).unwrap();
        assert_eq!(records[0].byte_size, 1);
    }

    #[test]
    fn unknown_type_surfaces_compile_failure() {
        // Passes name validation but cannot compile.
        let registry = Registry::parse("C | definitely_not_a_type | signed | integer").unwrap();
        let err = ProbeRunner::new().run(&registry).unwrap_err();
        match err {
            ProbeError::CompileFailed { stderr } => assert!(!stderr.is_empty()),
            other => panic!("expected CompileFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_compiler_surfaces_launch_failure() {
        let registry = Registry::builtin();
        let err = ProbeRunner::with_compiler("cbridge-no-such-compiler")
            .run(&registry)
            .unwrap_err();
        assert!(matches!(err, ProbeError::LaunchFailed { .. }));
    }

    #[test]
    fn empty_registry_yields_empty_report() {
        let records = ProbeRunner::new().run(&Registry::new()).unwrap();
        assert!(records.is_empty());
    }
}
