//! Mapset hitsound checker CLI library.
//!
//! This crate provides the `hs` command-line interface over `hs-core`.

mod cli;
pub mod commands;
mod config;
pub mod input;
pub mod render;

pub use cli::{Cli, Commands};
pub use config::Config;
