//! Checks command: lists the registered checks.

use std::io::Write;

use anyhow::Result;
use hs_core::CheckRegistry;

pub fn run<W: Write>(writer: &mut W, registry: &CheckRegistry) -> Result<()> {
    for check in registry.iter() {
        let info = check.info();
        writeln!(writer, "{} [{}] {}", info.id, info.category, info.message)?;
        writeln!(writer, "    {}", info.purpose)?;
    }
    Ok(())
}
