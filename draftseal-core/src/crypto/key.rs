//! In-memory secret key and its base64 export form.
//!
//! Only the raw 32 bytes are held. Both the exported string and the cipher
//! instance are derived from them on demand.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::types::{Algorithm, KEY_SIZE};
use crate::error::{Result, VaultError};

#[derive(Clone, ZeroizeOnDrop)]
struct KeyMaterial([u8; KEY_SIZE]);

/// A 256-bit AES-GCM key.
///
/// Key bytes are zeroized on drop and never appear in `Debug` output.
#[derive(Clone)]
pub struct SecretKey {
    material: KeyMaterial,
    extractable: bool,
}

impl SecretKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self {
            material: KeyMaterial(bytes),
            extractable: true,
        }
    }

    /// Parse a base64 key encoding.
    ///
    /// Surrounding ASCII whitespace is ignored so a pasted line or key file
    /// with a trailing newline still imports. Everything else must be valid
    /// padded base64 decoding to exactly 32 bytes.
    pub fn from_base64(encoding: &str) -> Result<Self> {
        let trimmed = encoding.trim_matches(|c: char| c.is_ascii_whitespace());

        let mut decoded = BASE64
            .decode(trimmed)
            .map_err(|e| VaultError::InvalidKeyFormat(format!("not valid base64: {}", e)))?;

        let result = <[u8; KEY_SIZE]>::try_from(decoded.as_slice())
            .map(Self::from_bytes)
            .map_err(|_| {
                VaultError::InvalidKeyFormat(format!(
                    "decoded to {} bytes (expected {})",
                    decoded.len(),
                    KEY_SIZE
                ))
            });

        decoded.zeroize();
        result
    }

    /// Encode the raw key bytes as padded standard base64.
    pub fn to_base64(&self) -> Result<String> {
        if !self.extractable {
            return Err(VaultError::ExportError("key is not extractable".into()));
        }
        Ok(BASE64.encode(&self.material.0))
    }

    /// A copy of this key that can still encrypt and decrypt but refuses
    /// export. There is no way back to an extractable key.
    pub fn non_extractable(&self) -> Self {
        Self {
            material: self.material.clone(),
            extractable: false,
        }
    }

    pub fn is_extractable(&self) -> bool {
        self.extractable
    }

    pub fn algorithm(&self) -> Algorithm {
        Algorithm::Aes256Gcm
    }

    pub(crate) fn material(&self) -> &[u8; KEY_SIZE] {
        &self.material.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("algorithm", &self.algorithm())
            .field("extractable", &self.extractable)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
