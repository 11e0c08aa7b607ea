pub mod aes_gcm;
pub mod key;
pub mod provider;
pub mod types;
pub mod vault;
