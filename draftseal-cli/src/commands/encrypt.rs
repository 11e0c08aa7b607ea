use anyhow::{Context, Result};
use draftseal_core::KeyVault;
use super::{read_input, write_output, KeyArgs};

pub fn execute(input: &str, output: &str, key: &KeyArgs) -> Result<()> {
    // Read input
    tracing::debug!("Reading plaintext from: {}", input);
    let bytes = read_input(input)
        .context("Failed to read input")?;
    let plaintext = String::from_utf8(bytes)
        .context("Input is not UTF-8 text")?;

    tracing::info!("Read {} bytes of plaintext", plaintext.len());

    let vault = KeyVault::new();
    let key = key.resolve(&vault)?;

    // Encrypt
    let envelope = vault.encrypt(&plaintext, &key)
        .context("Encryption failed")?;

    let json = envelope.to_json()
        .context("Failed to serialize envelope")?;

    // Write output
    tracing::debug!("Writing envelope to: {}", output);
    write_output(output, json.as_bytes())
        .context("Failed to write output")?;

    tracing::info!("Encryption successful");
    Ok(())
}
