//! `cbridge probe` — discover native type sizes.

use std::path::Path;

use anyhow::{Context, Result};

use cbridge_codegen::generate_probe;
use cbridge_probe::ProbeRunner;
use cbridge_typemap::{report, Registry};

/// Run the probe workflow: registry → probe program → compile/run → report.
///
/// With `emit_source` the generated program is written instead of executed,
/// which is useful for cross-compilation setups that run the probe elsewhere.
pub fn run(
    table: Option<&Path>,
    compiler: Option<&str>,
    emit_source: bool,
    output: Option<&Path>,
) -> Result<()> {
    let registry = load_registry(table)?;

    if emit_source {
        let source = generate_probe(registry.entries())?;
        return write_or_print(output, &source, "probe program");
    }

    let runner = match compiler {
        Some(c) => ProbeRunner::with_compiler(c),
        None => ProbeRunner::new(),
    };
    let records = runner.run(&registry)?;
    let rendered = report::render_report(&records);
    write_or_print(output, &rendered, "size report")
}

/// Load a registry table file, or fall back to the builtin C registry.
pub fn load_registry(table: Option<&Path>) -> Result<Registry> {
    match table {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading registry table {}", path.display()))?;
            Ok(Registry::parse(&content)
                .with_context(|| format!("parsing registry table {}", path.display()))?)
        }
        None => Ok(Registry::builtin()),
    }
}

fn write_or_print(output: Option<&Path>, content: &str, what: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {} to {}", what, path.display()))?;
            println!("Wrote {} → {}", what, path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
