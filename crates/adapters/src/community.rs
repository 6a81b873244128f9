// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The community-room poller collaborator, named as an external
//! collaborator and consumed by `retrieveDefaultOpenGroupRooms`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGroupRoom {
    pub token: String,
    pub name: String,
    pub image_id: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommunityError {
    #[error("community poller error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait CommunityPoller: Send + Sync {
    async fn fetch_default_rooms(&self) -> Result<Vec<OpenGroupRoom>, CommunityError>;
}
