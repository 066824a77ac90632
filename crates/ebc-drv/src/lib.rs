//! The `ebc` command-line driver: argument parsing, pipeline orchestration,
//! and the `--test` scenario harness.

mod config;
mod scenarios;
mod session;

pub use config::Config;
pub use session::{compile_to_c, Session};

/// Parse arguments, run the configured action, and return the process
/// exit code the caller should use.
pub fn run() -> i32 {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = <Config as clap::Parser>::parse();
    if config.test {
        return if scenarios::run_all() { 0 } else { 1 };
    }
    Session::new(config).run()
}
