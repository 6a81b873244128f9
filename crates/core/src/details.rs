// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque, variant-specific job parameters.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Opaque byte payload carried by a job, plus its content hash.
///
/// The engine never inspects `bytes`; producers serialize their own
/// variant-specific struct into it (the reference producer uses a
/// self-describing serialization). The hash is used only for
/// `shouldBeUnique` matching (variant + thread + hash) and is computed
/// once at construction rather than recomputed on every comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    bytes: Vec<u8>,
    hash: String,
}

/// Number of hex characters in a details hash (first 16 bytes of sha256, i.e. 32 hex chars).
const HASH_HEX_LEN: usize = 32;

impl JobDetails {
    pub fn new(bytes: Vec<u8>) -> Self {
        let hash = Self::compute_hash(&bytes);
        Self { bytes, hash }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Stable content hash, used to detect duplicate `shouldBeUnique` jobs.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    fn compute_hash(bytes: &[u8]) -> String {
        let digest = Sha256::digest(bytes);
        let mut hex = String::with_capacity(HASH_HEX_LEN);
        for byte in digest.iter().take(HASH_HEX_LEN / 2) {
            hex.push_str(&format!("{byte:02x}"));
        }
        hex
    }
}

impl From<Vec<u8>> for JobDetails {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

#[cfg(test)]
#[path = "details_tests.rs"]
mod tests;
