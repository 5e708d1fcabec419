// fluxcheck-core/src/domain/ledger.rs

use serde::{Deserialize, Serialize};

use crate::domain::record::{FileRecord, FileStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerStatus {
    Passed,
    Failed,
}

/// One line of the audit trail. Field names are the JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub file_path: String,
    pub status: LedgerStatus,
    /// `null` for passed files.
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Why the file is still at `file_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_error: Option<String>,
}

impl LedgerEntry {
    pub fn from_record(record: &FileRecord) -> Self {
        let passed = record.status == FileStatus::Accepted;
        Self {
            file_path: record.source.display().to_string(),
            status: if passed {
                LedgerStatus::Passed
            } else {
                LedgerStatus::Failed
            },
            reason: if passed {
                None
            } else {
                record
                    .reason
                    .as_ref()
                    .map(ToString::to_string)
                    .or_else(|| record.routing_failure.as_ref().map(ToString::to_string))
            },
            failed_part: record.failed_segment.map(|s| s.description().to_string()),
            destination: record.destination.as_ref().map(|d| d.display().to_string()),
            routing_error: record.routing_failure.as_ref().map(ToString::to_string),
        }
    }

    /// Block of the human-readable failure report. `None` for passed entries.
    pub fn report_block(&self) -> Option<String> {
        match self.status {
            LedgerStatus::Passed => None,
            LedgerStatus::Failed => {
                let reason = self.reason.as_deref().unwrap_or("unknown");
                let mut block = format!("FAILED {}\nReason: {}\n", self.file_path, reason);
                if let Some(routing) = self.routing_error.as_deref().filter(|r| *r != reason) {
                    block.push_str(&format!("Not moved: {routing}\n"));
                }
                block.push('\n');
                Some(block)
            }
        }
    }
}

/// Outcome of every processed file, each exactly once, in processing order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    conflicts: usize,
    move_failures: usize,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the record: it is terminal once recorded.
    pub fn record(&mut self, record: FileRecord) -> &LedgerEntry {
        match &record.routing_failure {
            Some(failure) if failure.is_conflict() => self.conflicts += 1,
            Some(_) => self.move_failures += 1,
            None => {}
        }
        self.entries.push(LedgerEntry::from_record(&record));
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == LedgerStatus::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.passed()
    }

    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// Files left in place for another reason than an occupied destination.
    pub fn move_failures(&self) -> usize {
        self.move_failures
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::naming::GrammarSegment;
    use crate::domain::record::{RejectionReason, RoutingFailure};
    use anyhow::Result;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_json_contract() -> Result<()> {
        let mut ledger = Ledger::new();

        let mut ok = FileRecord::pending(Path::new("data/OCIANE_RC2_1_HONORAIRES_Q_20230101.csv"));
        ok.accept();
        ok.destination = Some(PathBuf::from("Q_FILES/NO_ENT/OCIANE_RC2_1_HONORAIRES_Q_20230101.csv"));
        ledger.record(ok);

        let mut ko = FileRecord::pending(Path::new("data/bad.txt"));
        ko.failed_segment = Some(GrammarSegment::ProviderBatch);
        ko.reject(RejectionReason::GrammarMismatch);
        ledger.record(ko);

        let json: serde_json::Value = serde_json::from_str(&ledger.to_json()?)?;
        assert_eq!(json[0]["status"], "Passed");
        assert!(json[0]["reason"].is_null());
        assert!(json[0].get("failed_part").is_none());
        assert_eq!(json[1]["status"], "Failed");
        assert_eq!(json[1]["reason"], "Filename does not match naming grammar");
        assert_eq!(json[1]["failed_part"], "Provider with batch number");
        assert_eq!(ledger.passed(), 1);
        assert_eq!(ledger.failed(), 1);
        Ok(())
    }

    #[test]
    fn test_report_block_and_conflicts() {
        let mut ledger = Ledger::new();
        let mut conflict = FileRecord::pending(Path::new("data/a.csv"));
        conflict.accept();
        conflict.mark_unrouted(RoutingFailure::DestinationExists(PathBuf::from("Q_FILES/NO_ENT/a.csv")));
        let entry = ledger.record(conflict).clone();

        assert_eq!(ledger.conflicts(), 1);
        assert_eq!(ledger.move_failures(), 0);
        assert_eq!(
            entry.report_block().as_deref(),
            Some("FAILED data/a.csv\nReason: Destination already exists: Q_FILES/NO_ENT/a.csv\n\n")
        );
    }

    #[test]
    fn test_conflict_keeps_rejection_reason() -> Result<()> {
        let mut ledger = Ledger::new();
        let mut record = FileRecord::pending(Path::new("data/b.csv"));
        record.reject(RejectionReason::MissingFields {
            flux: "HONORAIRES".into(),
            fields: vec!["NUMERO_CONTRAT".into()],
        });
        record.mark_unrouted(RoutingFailure::DestinationExists(PathBuf::from("NO_MATCH/HONORAIRES/M/b.csv")));
        let entry = ledger.record(record).clone();

        assert_eq!(
            entry.reason.as_deref(),
            Some("Missing mandatory fields for HONORAIRES: NUMERO_CONTRAT")
        );
        assert_eq!(
            entry.report_block().as_deref(),
            Some(concat!(
                "FAILED data/b.csv\n",
                "Reason: Missing mandatory fields for HONORAIRES: NUMERO_CONTRAT\n",
                "Not moved: Destination already exists: NO_MATCH/HONORAIRES/M/b.csv\n\n"
            ))
        );

        let json: serde_json::Value = serde_json::from_str(&ledger.to_json()?)?;
        assert_eq!(
            json[0]["routing_error"],
            "Destination already exists: NO_MATCH/HONORAIRES/M/b.csv"
        );
        Ok(())
    }
}
