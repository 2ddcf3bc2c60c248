//! Backend worker: owns the tokio runtime that runs prediction submissions.

pub mod commands;
pub mod runtime;
