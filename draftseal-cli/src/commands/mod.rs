pub mod daemon;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;

use anyhow::{bail, Context, Result};
use clap::Args;
use draftseal_core::{KeyVault, SecretKey};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Where to find the project key
#[derive(Args, Debug, Default)]
pub struct KeyArgs {
    /// Base64 key as printed by `keygen`. Visible to other local users in
    /// the process list; prefer --key-file or DRAFTSEAL_KEY
    #[arg(short, long, env = "DRAFTSEAL_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// File containing the base64 key (takes precedence over --key)
    #[arg(long)]
    pub key_file: Option<PathBuf>,
}

impl KeyArgs {
    pub fn resolve(&self, vault: &KeyVault) -> Result<SecretKey> {
        let encoded = if let Some(path) = &self.key_file {
            tracing::debug!("Reading key from file: {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read key file {}", path.display()))?
        } else if let Some(key) = &self.key {
            key.clone()
        } else {
            bail!("No key provided: pass --key, --key-file, or set DRAFTSEAL_KEY");
        };

        vault
            .import_key(&encoded)
            .context("The key is not a valid draftseal key; check that it was copied completely")
    }
}

pub(crate) fn read_input(path: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if path == "-" {
        tracing::debug!("Reading from stdin");
        io::stdin().read_to_end(&mut buffer)?;
    } else {
        tracing::debug!("Reading from file: {}", path);
        File::open(path)?.read_to_end(&mut buffer)?;
    }
    Ok(buffer)
}

pub(crate) fn write_output(path: &str, data: &[u8]) -> Result<()> {
    if path == "-" {
        tracing::debug!("Writing to stdout");
        io::stdout().write_all(data)?;
    } else {
        tracing::debug!("Writing to file: {}", path);
        File::create(path)?.write_all(data)?;
    }
    Ok(())
}

/// Write a secret to `path`, readable only by the owner on Unix.
///
/// Refuses to replace an existing file unless `force` is set; a replaced
/// key file means every envelope sealed under the old key is lost.
pub(crate) fn write_key_file(path: &Path, data: &[u8], force: bool) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            bail!(
                "{} already exists; refusing to overwrite a key file (use --force to replace it)",
                path.display()
            );
        }
        Err(e) => return Err(e.into()),
    };

    // `mode` only applies on creation; tighten a file being replaced too
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    tracing::debug!("Writing key to file: {}", path.display());
    file.write_all(data)?;
    Ok(())
}
