// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The network client collaborator: request preparation and transport
//! are outside this crate's scope (the concrete wire protocol for each
//! endpoint is a non-goal); only the shapes an executor needs to call
//! are modeled here.

use async_trait::async_trait;
use thiserror::Error;

/// Classified transport/response errors a prepared request's `send()` may
/// raise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorised")]
    Unauthorised,
    #[error("parsing failed: {0}")]
    ParsingFailed(String),
    #[error("max file size exceeded")]
    MaxFileSizeExceeded,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// An immutable, signed, not-yet-sent network call.
#[async_trait]
pub trait PreparedRequest<T>: Send + Sync {
    async fn send(&self) -> Result<T, NetworkError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResponse {
    pub status_codes: Vec<u16>,
    pub bodies: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryEntry {
    pub hash: String,
    pub expiry_ms: u64,
}

/// The transport surface executors are allowed to reach for. Building
/// and sending an actual HTTP request is the embedder's concern; this
/// crate only defines the contract an executor invokes.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    async fn prepare_download(
        &self,
        url: &str,
        auth: Option<&str>,
    ) -> Result<Box<dyn PreparedRequest<Vec<u8>>>, NetworkError>;

    async fn prepare_upload(
        &self,
        data: Vec<u8>,
        auth: Option<&str>,
    ) -> Result<Box<dyn PreparedRequest<UploadResponse>>, NetworkError>;

    async fn prepare_batch(
        &self,
        requests: Vec<BatchRequest>,
    ) -> Result<Box<dyn PreparedRequest<BatchResponse>>, NetworkError>;

    async fn prepare_get_expiries(
        &self,
        hashes: Vec<String>,
        auth: &str,
    ) -> Result<Box<dyn PreparedRequest<Vec<ExpiryEntry>>>, NetworkError>;

    async fn prepare_update_expiry(
        &self,
        hashes: Vec<String>,
        new_expiry_ms: u64,
        shorten_only: bool,
        auth: &str,
    ) -> Result<Box<dyn PreparedRequest<()>>, NetworkError>;
}
