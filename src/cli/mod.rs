// src/cli/mod.rs
//! Command-line surface: argument parsing and run resolution.

pub mod args;
pub mod handlers;

pub use args::Cli;
