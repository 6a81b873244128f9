// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::community::{CommunityError, CommunityPoller, OpenGroupRoom};
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Default)]
pub struct FakeCommunityPoller {
    rooms: Mutex<Result<Vec<OpenGroupRoom>, CommunityError>>,
}

impl FakeCommunityPoller {
    pub fn new() -> Self {
        Self { rooms: Mutex::new(Ok(Vec::new())) }
    }

    pub fn set_rooms(&self, rooms: Vec<OpenGroupRoom>) {
        *self.rooms.lock() = Ok(rooms);
    }

    pub fn fail_with(&self, err: CommunityError) {
        *self.rooms.lock() = Err(err);
    }
}

#[async_trait]
impl CommunityPoller for FakeCommunityPoller {
    async fn fetch_default_rooms(&self) -> Result<Vec<OpenGroupRoom>, CommunityError> {
        self.rooms.lock().clone()
    }
}

#[cfg(test)]
#[path = "community_tests.rs"]
mod tests;
