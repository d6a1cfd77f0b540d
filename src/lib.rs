// src/lib.rs
pub mod cli;
pub mod commit;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod exit;
pub mod git;
pub mod interrupt;
pub mod logging;
pub mod probe;
pub mod progress;
pub mod reporting;
pub mod shell;
pub mod types;
