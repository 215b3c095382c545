//! Storage infrastructure: the TOML configuration file.
//!
//! The daemon never writes configuration; it only reads the file at startup
//! and falls back to built-in defaults when the default file is absent.

pub mod config;
