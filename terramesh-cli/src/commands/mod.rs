//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`batch`] - Generate a block of tiles concurrently
//! - [`config`] - Configuration management (path, show, init)
//! - [`generate`] - Generate a single tile mesh and print its summary

pub mod batch;
pub mod common;
pub mod config;
pub mod generate;
