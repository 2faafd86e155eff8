//! External process execution.
//!
//! This is the only module that talks to the operating system's process
//! facilities. Everything above it goes through [`ProcessRunner`].

mod command;
mod runner;

pub use command::ExternalCommand;
pub use runner::{ProcessRunner, SystemProcessRunner};

#[cfg(test)]
pub use runner::MockProcessRunner;
