use anyhow::{Context, Result};
use draftseal_core::{CiphertextEnvelope, KeyVault, VaultError};
use super::{read_input, write_output, KeyArgs};

pub fn execute(input: &str, output: &str, key: &KeyArgs) -> Result<()> {
    // Read envelope JSON
    tracing::debug!("Reading envelope from: {}", input);
    let envelope_json = read_input(input)
        .context("Failed to read input")?;

    let envelope: CiphertextEnvelope = serde_json::from_slice(&envelope_json)
        .context("Failed to parse envelope JSON")?;

    let vault = KeyVault::new();
    let key = key.resolve(&vault)?;

    // Decrypt
    let plaintext = vault.open(&envelope, &key).map_err(|e| {
        let message = if matches!(e, VaultError::AuthenticationFailed) {
            "Could not unlock: the key does not match this envelope, or the envelope was modified"
        } else {
            "Decryption failed"
        };
        anyhow::Error::new(e).context(message)
    })?;

    tracing::info!("Decrypted {} bytes of plaintext", plaintext.len());

    // Write output
    tracing::debug!("Writing plaintext to: {}", output);
    write_output(output, plaintext.as_bytes())
        .context("Failed to write output")?;

    tracing::info!("Decryption successful");
    Ok(())
}
