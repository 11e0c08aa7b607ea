use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::aes_gcm;
use crate::crypto::types::{IV_SIZE, KEY_SIZE};
use crate::error::{Result, VaultError};

/// Cryptographic capabilities the vault needs from its host.
///
/// The vault never reaches for a global RNG or cipher directly; everything
/// goes through a provider so tests and alternative backends can be
/// injected.
pub trait CryptoProvider: Send + Sync {
    /// Fill `buf` with cryptographically secure random bytes.
    ///
    /// Must fail with `UnsupportedEnvironment` rather than return weak bytes.
    fn fill_random(&self, buf: &mut [u8]) -> Result<()>;

    /// AES-256-GCM with no associated data; returns `ciphertext || tag`.
    fn aes_gcm_encrypt(
        &self,
        key: &[u8; KEY_SIZE],
        iv: &[u8; IV_SIZE],
        plaintext: &[u8],
    ) -> Result<Vec<u8>>;

    /// Inverse of [`aes_gcm_encrypt`](Self::aes_gcm_encrypt). Fails with
    /// `AuthenticationFailed` when the tag does not verify.
    fn aes_gcm_decrypt(
        &self,
        key: &[u8; KEY_SIZE],
        iv: &[u8; IV_SIZE],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;
}

/// Default provider: operating system RNG and the `aes-gcm` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCrypto;

impl CryptoProvider for SystemCrypto {
    fn fill_random(&self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| VaultError::UnsupportedEnvironment(e.to_string()))
    }

    fn aes_gcm_encrypt(
        &self,
        key: &[u8; KEY_SIZE],
        iv: &[u8; IV_SIZE],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        aes_gcm::encrypt(plaintext, key, iv)
    }

    fn aes_gcm_decrypt(
        &self,
        key: &[u8; KEY_SIZE],
        iv: &[u8; IV_SIZE],
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        aes_gcm::decrypt(ciphertext, key, iv)
    }
}
