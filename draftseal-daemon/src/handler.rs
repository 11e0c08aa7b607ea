use std::sync::Arc;

use draftseal_core::{CryptoProvider, KeyVault, SystemCrypto};
use crate::protocol::{Operation, Request, Response};

/// Maps protocol requests onto vault calls.
///
/// Cheap to clone; every connection gets its own handle to the same vault.
pub struct RequestHandler<P: CryptoProvider = SystemCrypto> {
    vault: Arc<KeyVault<P>>,
}

impl<P: CryptoProvider> Clone for RequestHandler<P> {
    fn clone(&self) -> Self {
        Self {
            vault: Arc::clone(&self.vault),
        }
    }
}

impl<P: CryptoProvider> RequestHandler<P> {
    pub fn new(vault: Arc<KeyVault<P>>) -> Self {
        Self { vault }
    }

    pub fn handle(&self, request: Request) -> Response {
        match request.operation {
            Operation::GenerateKey => self.handle_generate_key(),
            Operation::Encrypt => self.handle_encrypt(request),
            Operation::Decrypt => self.handle_decrypt(request),
        }
    }

    fn handle_generate_key(&self) -> Response {
        let exported = self
            .vault
            .generate_key()
            .and_then(|key| self.vault.export_key(&key));

        match exported {
            Ok(key) => Response::success_generate_key(key),
            Err(e) => Response::vault_error(&e),
        }
    }

    fn handle_encrypt(&self, request: Request) -> Response {
        let plaintext = match request.data.plaintext {
            Some(pt) => pt,
            None => return Response::invalid_request("Missing plaintext in encrypt request".into()),
        };
        let encoded_key = match request.data.key {
            Some(k) => k,
            None => return Response::invalid_request("Missing key in encrypt request".into()),
        };

        let key = match self.vault.import_key(&encoded_key) {
            Ok(k) => k,
            Err(e) => return Response::vault_error(&e),
        };

        match self.vault.encrypt(&plaintext, &key) {
            Ok(envelope) => Response::success_encrypt(envelope),
            Err(e) => Response::vault_error(&e),
        }
    }

    fn handle_decrypt(&self, request: Request) -> Response {
        let envelope = match request.data.envelope {
            Some(env) => env,
            None => return Response::invalid_request("Missing envelope in decrypt request".into()),
        };
        let encoded_key = match request.data.key {
            Some(k) => k,
            None => return Response::invalid_request("Missing key in decrypt request".into()),
        };

        let key = match self.vault.import_key(&encoded_key) {
            Ok(k) => k,
            Err(e) => return Response::vault_error(&e),
        };

        match self.vault.open(&envelope, &key) {
            Ok(plaintext) => Response::success_decrypt(plaintext),
            Err(e) => Response::vault_error(&e),
        }
    }
}
