use crate::crypto::key::SecretKey;
use crate::crypto::provider::{CryptoProvider, SystemCrypto};
use crate::crypto::types::{IV_SIZE, KEY_SIZE};
use crate::error::{Result, VaultError};
use crate::models::ciphertext_envelope::CiphertextEnvelope;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use zeroize::Zeroize;

/// Symmetric key vault for protecting a drafting project.
///
/// Workflow:
/// 1. `generate_key` once per project, `export_key` so the user can save it
/// 2. `encrypt` the project text whenever it is saved
/// 3. Later, `import_key` from the pasted string and `decrypt` to unlock
///
/// The vault holds nothing but its provider. Every call is independent, so
/// a single instance can be shared between threads.
pub struct KeyVault<P: CryptoProvider = SystemCrypto> {
    provider: P,
}

impl KeyVault<SystemCrypto> {
    pub fn new() -> Self {
        Self::with_provider(SystemCrypto)
    }
}

impl Default for KeyVault<SystemCrypto> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CryptoProvider> KeyVault<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Generate a fresh random 256-bit key
    ///
    /// # Errors
    /// `UnsupportedEnvironment` if the secure random source is unavailable
    pub fn generate_key(&self) -> Result<SecretKey> {
        let mut bytes = [0u8; KEY_SIZE];
        if let Err(e) = self.provider.fill_random(&mut bytes) {
            bytes.zeroize();
            return Err(e);
        }

        let key = SecretKey::from_bytes(bytes);
        bytes.zeroize();

        tracing::debug!("Generated new {} key", key.algorithm());
        Ok(key)
    }

    /// Export a key as a 44-character base64 string
    ///
    /// # Errors
    /// `ExportError` if the key was made non-extractable
    pub fn export_key(&self, key: &SecretKey) -> Result<String> {
        key.to_base64()
    }

    /// Reconstruct a key from its exported encoding
    ///
    /// # Errors
    /// `InvalidKeyFormat` if the input is not base64 or is not 32 bytes
    pub fn import_key(&self, encoding: &str) -> Result<SecretKey> {
        let key = SecretKey::from_base64(encoding);
        if let Err(e) = &key {
            tracing::debug!("Key import rejected: {}", e);
        }
        key
    }

    /// Encrypt UTF-8 text under `key`
    ///
    /// A new random IV is drawn for every call, so encrypting the same text
    /// twice yields different envelopes.
    ///
    /// # Returns
    /// CiphertextEnvelope with base64-encoded IV and ciphertext
    pub fn encrypt(&self, plaintext: &str, key: &SecretKey) -> Result<CiphertextEnvelope> {
        let mut iv = [0u8; IV_SIZE];
        self.provider.fill_random(&mut iv)?;

        let ciphertext = self
            .provider
            .aes_gcm_encrypt(key.material(), &iv, plaintext.as_bytes())?;

        tracing::trace!(
            "Encrypted {} bytes into {} bytes",
            plaintext.len(),
            ciphertext.len()
        );

        Ok(CiphertextEnvelope {
            iv: BASE64.encode(iv),
            ciphertext: BASE64.encode(&ciphertext),
        })
    }

    /// Decrypt base64 `ciphertext` using base64 `iv` and `key`
    ///
    /// # Errors
    /// * `InvalidEncoding` - either input is not base64, the IV is not 12
    ///   bytes, or the authenticated bytes are not UTF-8
    /// * `AuthenticationFailed` - wrong key, or ciphertext/IV was altered
    pub fn decrypt(&self, ciphertext: &str, iv: &str, key: &SecretKey) -> Result<String> {
        let ciphertext = BASE64
            .decode(ciphertext)
            .map_err(|e| VaultError::InvalidEncoding(format!("ciphertext: {}", e)))?;
        let iv_bytes = BASE64
            .decode(iv)
            .map_err(|e| VaultError::InvalidEncoding(format!("iv: {}", e)))?;

        let iv = <[u8; IV_SIZE]>::try_from(iv_bytes.as_slice()).map_err(|_| {
            VaultError::InvalidEncoding(format!(
                "iv is {} bytes (expected {})",
                iv_bytes.len(),
                IV_SIZE
            ))
        })?;

        let plaintext = match self.provider.aes_gcm_decrypt(key.material(), &iv, &ciphertext) {
            Ok(pt) => pt,
            Err(e) => {
                tracing::debug!("Decryption rejected: {}", e);
                return Err(e);
            }
        };

        String::from_utf8(plaintext).map_err(|e| {
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            VaultError::InvalidEncoding("decrypted data is not valid UTF-8".into())
        })
    }

    /// Decrypt a whole envelope
    pub fn open(&self, envelope: &CiphertextEnvelope, key: &SecretKey) -> Result<String> {
        self.decrypt(&envelope.ciphertext, &envelope.iv, key)
    }
}
