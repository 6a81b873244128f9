// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The cryptographic provider collaborator. Its errors classify
//! deterministically and stay distinct from transport errors.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
    #[error("signature invalid: {0}")]
    SignatureInvalid(String),
    /// A provider-side failure not attributable to bad input or a forged
    /// signature (e.g. a hardware enclave hiccup). Executors classify this
    /// as `JobError::TransientCrypto`, distinct from the other, permanent
    /// variants above.
    #[error("transient crypto provider error: {0}")]
    Transient(String),
}

/// Cryptographic operations consumed by executors: attachment
/// encrypt/decrypt, signing, and blinded-key derivation for community
/// privacy.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    async fn decrypt_attachment(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        digest: &[u8],
        unpadded_size: Option<u64>,
    ) -> Result<Vec<u8>, CryptoError>;

    async fn encrypt_attachment(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError>;

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    async fn generate_blinded_key(&self, server_pubkey: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
