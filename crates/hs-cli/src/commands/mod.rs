//! CLI subcommand implementations.

pub mod check;
pub mod checks;
pub mod schemes;
