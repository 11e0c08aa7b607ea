use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "AES-256-GCM")]
    Aes256Gcm,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Aes256Gcm => "AES-256-GCM",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Constants
pub const KEY_SIZE: usize = 32; // 256 bits
pub const IV_SIZE: usize = 12; // 96 bits (recommended)
pub const TAG_SIZE: usize = 16; // 128 bits
/// Length of a padded standard base64 encoding of `KEY_SIZE` bytes.
pub const EXPORTED_KEY_LEN: usize = 44;
