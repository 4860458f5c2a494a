//! Probe runner error types.

/// Errors that can occur while compiling and executing a size probe.
///
/// A failed native compile indicates a configuration defect, so nothing here
/// is retried; every variant carries enough context to diagnose offline.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The probe program could not be generated.
    #[error("probe generation failed: {0}")]
    Generate(#[from] cbridge_codegen::CodegenError),

    /// The native compiler could not be invoked at all.
    #[error("failed to invoke compiler '{compiler}': {source}")]
    LaunchFailed {
        compiler: String,
        source: std::io::Error,
    },

    /// The native compiler rejected the probe program.
    #[error("probe compilation failed:\n{stderr}")]
    CompileFailed { stderr: String },

    /// The compiled probe exited abnormally.
    #[error("probe execution failed ({status}): {stderr}")]
    ExecFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The probe's output was not a well-formed size report.
    #[error("probe report error: {0}")]
    Report(#[from] cbridge_typemap::TypemapError),

    /// Temp-dir or file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
