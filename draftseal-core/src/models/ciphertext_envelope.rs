use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output of one encryption call: the IV it drew and the authenticated
/// ciphertext, both base64-encoded.
///
/// The envelope does not record which key produced it. Keeping the right
/// key with the right envelope is up to whoever stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CiphertextEnvelope {
    /// Base64-encoded 12-byte initialization vector
    pub iv: String,

    /// Base64-encoded ciphertext with the 16-byte tag appended
    pub ciphertext: String,
}

impl CiphertextEnvelope {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
