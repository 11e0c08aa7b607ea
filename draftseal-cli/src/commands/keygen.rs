use anyhow::{Context, Result};
use draftseal_core::KeyVault;
use std::path::Path;
use super::{write_key_file, write_output};

pub fn execute(output: &str, force: bool) -> Result<()> {
    let vault = KeyVault::new();

    let key = vault.generate_key()
        .context("Failed to generate key")?;
    let exported = vault.export_key(&key)
        .context("Failed to export key")?;
    let line = format!("{}\n", exported);

    if output == "-" {
        write_output(output, line.as_bytes())
            .context("Failed to write key")?;
    } else {
        write_key_file(Path::new(output), line.as_bytes(), force)
            .context("Failed to write key")?;
        tracing::info!("Key written to {}; keep it safe, it cannot be recovered", output);
    }
    Ok(())
}
