//! Resource resolution for the `berth` deployment CLI.
//!
//! [`select`] decides which application, environment, workload, pipeline,
//! task, topic, or local path a command refers to. The remaining modules
//! supply its collaborators and the command-line surface around it.
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod model;
pub mod prompt;
pub mod select;
pub mod store;
pub mod workspace;
