//! End-to-end tests driving the built `ebc` binary as a subprocess.

mod cli_tests;
mod compilation_tests;
