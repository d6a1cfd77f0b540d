// src/types/mod.rs
//! Data records shared between the executor, dispatcher and reporting.

mod command;
pub use command::{CommandResult, TIMEOUT_EXIT_CODE};
