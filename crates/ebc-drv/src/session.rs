use std::io::Read;
use std::path::PathBuf;
use std::process::Command;

use ebc_lex::Lexer;
use ebc_util::{CompileError, CompileResult, FileId, SourceMap};

use crate::config::Config;

/// One invocation of the compiler: reads a single source, drives every
/// phase to completion or the first error, and (optionally) hands the
/// result to the host toolchain.
pub struct Session {
    config: Config,
    sources: SourceMap,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sources: SourceMap::new(),
        }
    }

    /// Run the configured action; returns the process exit code.
    pub fn run(mut self) -> i32 {
        let (name, text) = match self.read_source() {
            Ok(pair) => pair,
            Err(e) => return self.report(&e),
        };
        let file_id = self.sources.add_file(name, text.clone());

        tracing::debug!(file = %self.sources.name(file_id), "compiling");
        let emitted = match compile_to_c(&text, file_id) {
            Ok(c) => c,
            Err(e) => return self.report(&e),
        };

        if self.config.run && !self.config.compile_only {
            self.run_emitted(&emitted)
        } else {
            match self.write_output(&emitted) {
                Ok(()) => 0,
                Err(e) => self.report(&e),
            }
        }
    }

    fn read_source(&self) -> CompileResult<(String, String)> {
        match &self.config.input {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| CompileError::io(format!("reading {}: {e}", path.display())))?;
                Ok((path.display().to_string(), text))
            }
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| CompileError::io(format!("reading stdin: {e}")))?;
                Ok(("<stdin>".to_string(), text))
            }
        }
    }

    fn write_output(&self, emitted: &str) -> CompileResult<()> {
        match &self.config.output {
            Some(path) => std::fs::write(path, emitted)
                .map_err(|e| CompileError::io(format!("writing {}: {e}", path.display()))),
            None => {
                print!("{emitted}");
                Ok(())
            }
        }
    }

    fn run_emitted(&self, emitted: &str) -> i32 {
        let source_path = match &self.config.output {
            Some(path) => path.clone(),
            None => temp_c_path(),
        };
        if let Err(e) = std::fs::write(&source_path, emitted) {
            return self.report(&CompileError::io(format!(
                "writing {}: {e}",
                source_path.display()
            )));
        }

        let binary_path = source_path.with_extension("out");
        tracing::debug!(cc = %self.config.cc, input = %source_path.display(), "invoking host C compiler");
        let compile_status = match Command::new(&self.config.cc)
            .arg(&source_path)
            .arg("-o")
            .arg(&binary_path)
            .status()
        {
            Ok(status) => status,
            Err(e) => {
                return self.report(&CompileError::io(format!(
                    "launching {}: {e}",
                    self.config.cc
                )))
            }
        };
        if !compile_status.success() {
            return self.report(&CompileError::io(format!(
                "{} failed with {compile_status}",
                self.config.cc
            )));
        }

        tracing::debug!(binary = %binary_path.display(), "executing compiled program");
        match Command::new(&binary_path).status() {
            Ok(status) => status.code().unwrap_or(2),
            Err(e) => self.report(&CompileError::io(format!(
                "executing {}: {e}",
                binary_path.display()
            ))),
        }
    }

    fn report(&self, err: &CompileError) -> i32 {
        eprintln!("{}", err.display_with_file(|id| self.sources.name(id)));
        err.exit_code()
    }
}

fn temp_c_path() -> PathBuf {
    std::env::temp_dir().join(format!("ebc-{}.c", std::process::id()))
}

/// Lex, parse, check, and analyze `source`, emitting target C on success.
/// Each phase's error aborts the pipeline before the next one runs.
pub fn compile_to_c(source: &str, file_id: FileId) -> CompileResult<String> {
    let tokens = Lexer::new(source, file_id).tokenize()?;
    let program = ebc_par::parse(tokens)?;
    ebc_sem::check_program(&program)?;
    ebc_safety::analyze(&program)?;
    Ok(ebc_gen::emit(&program))
}
