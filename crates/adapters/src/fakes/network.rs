// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A scriptable fake network client: each `prepare_*` call hands out a
//! canned [`FakePreparedRequest`] whose `send()` replays a programmed
//! result. Tests configure behavior by pushing results onto the relevant
//! queue before running the executor under test.

use crate::network::{
    BatchRequest, BatchResponse, ExpiryEntry, NetworkClient, NetworkError, PreparedRequest,
    UploadResponse,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A prepared request that replays one programmed result.
pub struct FakePreparedRequest<T> {
    result: Mutex<Option<Result<T, NetworkError>>>,
}

impl<T> FakePreparedRequest<T> {
    pub fn new(result: Result<T, NetworkError>) -> Self {
        Self { result: Mutex::new(Some(result)) }
    }
}

#[async_trait]
impl<T: Send + Sync> PreparedRequest<T> for FakePreparedRequest<T> {
    async fn send(&self) -> Result<T, NetworkError> {
        self.result.lock().take().unwrap_or(Err(NetworkError::Transport(
            "FakePreparedRequest::send called more than once".into(),
        )))
    }
}

#[derive(Default)]
pub struct FakeNetworkClient {
    downloads: Mutex<VecDeque<Result<Vec<u8>, NetworkError>>>,
    uploads: Mutex<VecDeque<Result<UploadResponse, NetworkError>>>,
    batches: Mutex<VecDeque<Result<BatchResponse, NetworkError>>>,
    expiries: Mutex<VecDeque<Result<Vec<ExpiryEntry>, NetworkError>>>,
    update_expiries: Mutex<VecDeque<Result<(), NetworkError>>>,
}

impl FakeNetworkClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_download(&self, result: Result<Vec<u8>, NetworkError>) {
        self.downloads.lock().push_back(result);
    }

    pub fn push_upload(&self, result: Result<UploadResponse, NetworkError>) {
        self.uploads.lock().push_back(result);
    }

    pub fn push_batch(&self, result: Result<BatchResponse, NetworkError>) {
        self.batches.lock().push_back(result);
    }

    pub fn push_expiries(&self, result: Result<Vec<ExpiryEntry>, NetworkError>) {
        self.expiries.lock().push_back(result);
    }

    pub fn push_update_expiry(&self, result: Result<(), NetworkError>) {
        self.update_expiries.lock().push_back(result);
    }
}

#[async_trait]
impl NetworkClient for FakeNetworkClient {
    async fn prepare_download(
        &self,
        _url: &str,
        _auth: Option<&str>,
    ) -> Result<Box<dyn PreparedRequest<Vec<u8>>>, NetworkError> {
        let result = self
            .downloads
            .lock()
            .pop_front()
            .unwrap_or(Err(NetworkError::Transport("no fake download queued".into())));
        Ok(Box::new(FakePreparedRequest::new(result)))
    }

    async fn prepare_upload(
        &self,
        _data: Vec<u8>,
        _auth: Option<&str>,
    ) -> Result<Box<dyn PreparedRequest<UploadResponse>>, NetworkError> {
        let result = self
            .uploads
            .lock()
            .pop_front()
            .unwrap_or(Err(NetworkError::Transport("no fake upload queued".into())));
        Ok(Box::new(FakePreparedRequest::new(result)))
    }

    async fn prepare_batch(
        &self,
        _requests: Vec<BatchRequest>,
    ) -> Result<Box<dyn PreparedRequest<BatchResponse>>, NetworkError> {
        let result = self
            .batches
            .lock()
            .pop_front()
            .unwrap_or(Err(NetworkError::Transport("no fake batch queued".into())));
        Ok(Box::new(FakePreparedRequest::new(result)))
    }

    async fn prepare_get_expiries(
        &self,
        _hashes: Vec<String>,
        _auth: &str,
    ) -> Result<Box<dyn PreparedRequest<Vec<ExpiryEntry>>>, NetworkError> {
        let result = self
            .expiries
            .lock()
            .pop_front()
            .unwrap_or(Err(NetworkError::Transport("no fake expiries queued".into())));
        Ok(Box::new(FakePreparedRequest::new(result)))
    }

    async fn prepare_update_expiry(
        &self,
        _hashes: Vec<String>,
        _new_expiry_ms: u64,
        _shorten_only: bool,
        _auth: &str,
    ) -> Result<Box<dyn PreparedRequest<()>>, NetworkError> {
        let result = self
            .update_expiries
            .lock()
            .pop_front()
            .unwrap_or(Err(NetworkError::Transport("no fake update-expiry queued".into())));
        Ok(Box::new(FakePreparedRequest::new(result)))
    }
}

#[cfg(test)]
#[path = "network_tests.rs"]
mod tests;
