//! Command-line parsing.
//!
//! The driver recognizes a handful of literal subcommands; there is no
//! flag grammar. Matching is case-insensitive.

use crate::errors::{DriverError, Result};
use std::path::PathBuf;

/// Usage line for the `build` command.
pub const BUILD_USAGE: &str = "Usage: amberlink build <file>";

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// No command, or an explicit request for help.
    Usage,
    /// Build the compiler and VM and stage them (`init`, or `compile`).
    BuildToolchain,
    /// Compile one source file with the staged compiler.
    CompileFile(PathBuf),
    /// Install the toolchain. Not implemented.
    Install,
    /// Anything else; holds the token as typed.
    Unknown(String),
}

impl Command {
    /// Parses the arguments following the program name.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Usage`] when `build` is not given exactly one
    /// file.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let Some((first, rest)) = args.split_first() else {
            return Ok(Self::Usage);
        };
        let token = first.as_ref();

        let command = match token.to_ascii_lowercase().as_str() {
            "help" | "-h" | "--help" => Self::Usage,
            "init" | "compile" => Self::BuildToolchain,
            "build" => match rest {
                [file] => Self::CompileFile(PathBuf::from(file.as_ref())),
                _ => return Err(DriverError::usage(BUILD_USAGE)),
            },
            "install" => Self::Install,
            _ => Self::Unknown(token.to_string()),
        };
        Ok(command)
    }
}
