// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An append-only, newline-delimited JSON log backing an on-disk
//! [`crate::store::WalJobStore`]. Each line is one [`StoreEvent`]; the log
//! is the durable source of truth, the [`crate::state::JobTable`] is a
//! cache rebuilt from it on open.

use crate::error::StoreError;
use crate::events::StoreEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

pub struct Wal {
    path: PathBuf,
    file: File,
}

impl Wal {
    /// Open (creating if absent) the log at `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    /// Replay every event currently on disk, in append order.
    pub fn replay(&self) -> Result<Vec<StoreEvent>, StoreError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut events = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            events.push(serde_json::from_str(&line)?);
        }
        Ok(events)
    }

    /// Append one event and fsync so a crash immediately after this call
    /// cannot lose it.
    pub fn append(&mut self, event: &StoreEvent) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.sync_data()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
