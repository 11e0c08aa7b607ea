use serde::{Deserialize, Serialize};
use draftseal_core::{CiphertextEnvelope, VaultError};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    GenerateKey,
    Encrypt,
    Decrypt,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub operation: Operation,
    #[serde(default)]
    pub data: RequestData,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    // Encrypt fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintext: Option<String>,

    /// Exported key encoding, required for encrypt and decrypt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    // Decrypt fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<CiphertextEnvelope>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResponseResult>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseResult {
    GenerateKey { key: String },
    Encrypt { envelope: CiphertextEnvelope },
    Decrypt { plaintext: String },
}

/// `errorKind` for malformed requests that never reached the vault
pub const INVALID_REQUEST: &str = "invalid_request";

impl Response {
    pub fn success_generate_key(key: String) -> Self {
        Self::success(ResponseResult::GenerateKey { key })
    }

    pub fn success_encrypt(envelope: CiphertextEnvelope) -> Self {
        Self::success(ResponseResult::Encrypt { envelope })
    }

    pub fn success_decrypt(plaintext: String) -> Self {
        Self::success(ResponseResult::Decrypt { plaintext })
    }

    pub fn invalid_request(message: String) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message),
            error_kind: Some(INVALID_REQUEST.to_string()),
        }
    }

    pub fn vault_error(err: &VaultError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind().to_string()),
        }
    }

    fn success(result: ResponseResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
            error_kind: None,
        }
    }
}
