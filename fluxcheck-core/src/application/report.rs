// fluxcheck-core/src/application/report.rs

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::ledger::{Ledger, LedgerEntry};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

/// Human-readable failure report, one block per failing file.
///
/// The first block of a run truncates the file, the next ones are appended. A run
/// that writes no block removes the file left by a previous run.
pub struct FailureReport {
    path: PathBuf,
    blocks: usize,
}

impl FailureReport {
    pub fn new(path: PathBuf) -> Self {
        Self { path, blocks: 0 }
    }

    pub fn append(&mut self, entry: &LedgerEntry) -> Result<(), InfrastructureError> {
        let Some(block) = entry.report_block() else {
            return Ok(());
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(self.blocks > 0)
            .truncate(self.blocks == 0)
            .open(&self.path)?;
        file.write_all(block.as_bytes())?;
        self.blocks += 1;
        Ok(())
    }

    /// Returns the report path when the run produced one.
    pub fn finish(self) -> Result<Option<PathBuf>, InfrastructureError> {
        if self.blocks > 0 {
            info!(path = ?self.path, blocks = self.blocks, "📝 Failure report written");
            return Ok(Some(self.path));
        }
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!(path = ?self.path, "🧹 No failure: previous report removed");
        }
        Ok(None)
    }
}

/// Writes the JSON ledger in one piece.
pub fn write_ledger(path: &Path, ledger: &Ledger) -> Result<(), InfrastructureError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    atomic_write(path, ledger.to_json()?)?;
    info!(path = ?path, entries = ledger.len(), "📒 Ledger written");
    Ok(())
}
