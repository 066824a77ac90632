use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration for the `ebc` binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "ebc", about = "Compiler for the Eightebed language")]
pub struct Config {
    /// Source file to compile; omit to read from standard input.
    pub input: Option<PathBuf>,

    /// Compile, invoke the host C compiler, run the result, and exit with
    /// its exit code.
    #[arg(long)]
    pub run: bool,

    /// Emit target C and stop (the default when `--run` isn't given).
    #[arg(long = "compile-only")]
    pub compile_only: bool,

    /// Where to write the emitted target C. Defaults to stdout, or a
    /// temporary file when `--run` is given.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Host C compiler to invoke under `--run`.
    #[arg(long, default_value = "cc")]
    pub cc: String,

    /// Run the built-in scenario suite and report pass/fail counts.
    #[arg(long)]
    pub test: bool,
}
