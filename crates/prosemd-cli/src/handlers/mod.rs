//! Command handlers.
//!
//! Each handler takes the bootstrapped [`CliContext`](crate::CliContext),
//! prints for the terminal and returns the process exit code.

pub mod ensure;
pub mod paths;
pub mod run;
