pub mod ciphertext_envelope;
