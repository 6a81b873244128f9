// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A deterministic fake crypto provider: "encryption" XORs the plaintext
//! with the key (repeated), "decryption" is the same XOR applied again.
//! Good enough to exercise executor control flow without a real provider.

use crate::crypto::{CryptoError, CryptoProvider};
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Default)]
pub struct FakeCryptoProvider {
    /// When set, every operation fails with this error instead of running.
    pub force_error: Mutex<Option<CryptoError>>,
}

impl FakeCryptoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, err: CryptoError) {
        *self.force_error.lock() = Some(err);
    }

    fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
        if key.is_empty() {
            return data.to_vec();
        }
        data.iter().enumerate().map(|(i, b)| b ^ key[i % key.len()]).collect()
    }
}

#[async_trait]
impl CryptoProvider for FakeCryptoProvider {
    async fn decrypt_attachment(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        _digest: &[u8],
        _unpadded_size: Option<u64>,
    ) -> Result<Vec<u8>, CryptoError> {
        if let Some(err) = self.force_error.lock().clone() {
            return Err(err);
        }
        Ok(Self::xor(ciphertext, key))
    }

    async fn encrypt_attachment(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if let Some(err) = self.force_error.lock().clone() {
            return Err(err);
        }
        Ok(Self::xor(plaintext, key))
    }

    async fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if let Some(err) = self.force_error.lock().clone() {
            return Err(err);
        }
        Ok(message.to_vec())
    }

    async fn generate_blinded_key(&self, server_pubkey: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if let Some(err) = self.force_error.lock().clone() {
            return Err(err);
        }
        Ok(server_pubkey.to_vec())
    }
}

#[cfg(test)]
#[path = "crypto_tests.rs"]
mod tests;
