use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Secure random source unavailable: {0}")]
    UnsupportedEnvironment(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Deliberately carries no detail about which check failed.
    #[error("Authentication failed: wrong key or corrupted data")]
    AuthenticationFailed,

    #[error("Key export failed: {0}")]
    ExportError(String),

    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VaultError {
    /// Stable identifier for callers that need to branch on the failure
    /// without matching on the enum (e.g. across the daemon socket).
    pub fn kind(&self) -> &'static str {
        match self {
            VaultError::UnsupportedEnvironment(_) => "unsupported_environment",
            VaultError::InvalidKeyFormat(_) => "invalid_key_format",
            VaultError::InvalidEncoding(_) => "invalid_encoding",
            VaultError::AuthenticationFailed => "authentication_failed",
            VaultError::ExportError(_) => "export_error",
            VaultError::EncryptionError(_) => "encryption_error",
            VaultError::Serialization(_) => "serialization_error",
        }
    }

    /// Whether the user can fix this by supplying different input
    /// (re-entering the key, re-pasting the envelope).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            VaultError::InvalidKeyFormat(_)
                | VaultError::InvalidEncoding(_)
                | VaultError::AuthenticationFailed
        )
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
