pub mod crypto;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::{Result, VaultError};
pub use models::ciphertext_envelope::CiphertextEnvelope;
pub use crypto::key::SecretKey;
pub use crypto::provider::{CryptoProvider, SystemCrypto};
pub use crypto::types::Algorithm;
pub use crypto::vault::KeyVault;
