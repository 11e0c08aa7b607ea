use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use crate::crypto::types::{IV_SIZE, KEY_SIZE, TAG_SIZE};
use crate::error::{Result, VaultError};

/// Encrypt data with AES-256-GCM
///
/// Returns the ciphertext with the 16-byte tag appended, which is the
/// layout the `aes-gcm` crate produces and the layout stored in envelopes.
/// No associated data is authenticated.
pub fn encrypt(plaintext: &[u8], key: &[u8; KEY_SIZE], iv: &[u8; IV_SIZE]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    cipher
        .encrypt(Nonce::from_slice(iv), plaintext)
        .map_err(|e| VaultError::EncryptionError(e.to_string()))
}

/// Decrypt data with AES-256-GCM
///
/// Any verification failure, including input too short to hold a tag,
/// maps to `AuthenticationFailed`. Nothing is returned unless the tag
/// verifies.
pub fn decrypt(
    ciphertext_with_tag: &[u8],
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
) -> Result<Vec<u8>> {
    if ciphertext_with_tag.len() < TAG_SIZE {
        return Err(VaultError::AuthenticationFailed);
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    cipher
        .decrypt(Nonce::from_slice(iv), ciphertext_with_tag)
        .map_err(|_| VaultError::AuthenticationFailed)
}
