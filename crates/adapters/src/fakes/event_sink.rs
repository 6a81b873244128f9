// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Records every emitted event for test assertions instead of forwarding
//! to a real UI/config layer.

use crate::event_sink::{EventSink, ExecutorEvent};
use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(Default)]
pub struct FakeEventSink {
    events: Mutex<Vec<ExecutorEvent>>,
}

impl FakeEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ExecutorEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl EventSink for FakeEventSink {
    async fn emit(&self, event: ExecutorEvent) {
        self.events.lock().push(event);
    }
}

#[cfg(test)]
#[path = "event_sink_tests.rs"]
mod tests;
