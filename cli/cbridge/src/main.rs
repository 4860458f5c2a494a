//! cbridge CLI — C-linkage bridge generation and native size probing.

mod commands;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cbridge", version, about = "C-linkage bridge generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe native type sizes with the system C compiler
    Probe {
        /// Registry table file (pipe-delimited; default: builtin C types)
        #[arg(long)]
        table: Option<String>,
        /// Compiler binary to invoke (default: cc)
        #[arg(long)]
        compiler: Option<String>,
        /// Write the probe program source instead of running it
        #[arg(long)]
        emit_source: bool,
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Generate a header/module pair from a bridge declaration
    Generate {
        /// Input .bridge.toml declaration file
        declaration: String,
        /// Output directory (default: current directory)
        #[arg(long)]
        out_dir: Option<String>,
    },
    /// Write the byte-array boundary source pair
    Bytearray {
        /// Output directory (default: current directory)
        #[arg(long)]
        out_dir: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Probe {
            table,
            compiler,
            emit_source,
            output,
        } => commands::probe::run(
            table.as_deref().map(Path::new),
            compiler.as_deref(),
            emit_source,
            output.as_deref().map(Path::new),
        ),

        Commands::Generate {
            declaration,
            out_dir,
        } => commands::generate::run(Path::new(&declaration), &resolve_out_dir(out_dir)),

        Commands::Bytearray { out_dir } => commands::bytearray::run(&resolve_out_dir(out_dir)),
    }
}

fn resolve_out_dir(out_dir: Option<String>) -> PathBuf {
    out_dir.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."))
}
