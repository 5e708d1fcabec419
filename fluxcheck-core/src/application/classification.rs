// fluxcheck-core/src/application/classification.rs

use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

use crate::domain::batch::BatchState;
use crate::domain::error::DomainError;
use crate::domain::naming::{
    EntityId, GrammarSegment, NameMismatch, NamingRule, Period, SimplifiedNameExtractor,
};
use crate::domain::project::NamingConfig;
use crate::domain::record::{FileRecord, FileStatus, FluxGate, RejectionReason};
use crate::domain::specification::SpecificationStore;

/// Outcome of reading one filename.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub accepted: bool,
    pub resolved_flux: Option<String>,
    pub best_guess_flux: Option<String>,
    pub period: Option<Period>,
    pub entity: Option<EntityId>,
    pub dates: Vec<NaiveDate>,
    pub failed_segment: Option<GrammarSegment>,
    pub reason: Option<RejectionReason>,
}

impl Classification {
    fn rejected(reason: RejectionReason) -> Self {
        Self {
            accepted: false,
            resolved_flux: None,
            best_guess_flux: None,
            period: None,
            entity: None,
            dates: Vec::new(),
            failed_segment: None,
            reason: Some(reason),
        }
    }

    pub fn reporting_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn into_record(self, source: &Path) -> FileRecord {
        let mut record = FileRecord::pending(source);
        record.resolved_flux = self.resolved_flux;
        record.best_guess_flux = self.best_guess_flux;
        record.period = self.period;
        record.entity = self.entity;
        record.dates = self.dates;
        record.failed_segment = self.failed_segment;
        match self.reason {
            Some(reason) => record.reject(reason),
            None => record.accept(),
        }
        record
    }
}

/// Filename grammar + dual allow-list gate.
pub struct NameClassifier<'a> {
    rule: NamingRule,
    simplified: SimplifiedNameExtractor,
    store: &'a SpecificationStore,
}

impl<'a> NameClassifier<'a> {
    pub fn new(naming: &NamingConfig, store: &'a SpecificationStore) -> Result<Self, DomainError> {
        Ok(Self {
            rule: NamingRule::new(&naming.provider, &naming.extension)?,
            simplified: SimplifiedNameExtractor::new(&naming.provider)?,
            store,
        })
    }

    pub fn classify(&self, filename: &str) -> Classification {
        let parsed = match self.rule.parse(filename) {
            Ok(parsed) => parsed,
            Err(mismatch) => return self.classify_mismatch(filename, mismatch),
        };

        let flux = self.store.canonical(&parsed.flux);
        let mut result = Classification {
            accepted: true,
            resolved_flux: Some(flux.clone()),
            best_guess_flux: None,
            period: Some(parsed.period),
            entity: parsed.entity,
            dates: parsed.dates,
            failed_segment: None,
            reason: None,
        };

        let closed_gate = if !self.store.is_declared(&flux) {
            Some(FluxGate::Declared)
        } else if !self.store.is_sanctioned(&flux) {
            Some(FluxGate::Sanctioned)
        } else {
            None
        };
        if let Some(gate) = closed_gate {
            debug!(filename, flux = %flux, gate = ?gate, "Flux refused by allow-list");
            result.accepted = false;
            result.resolved_flux = None;
            result.best_guess_flux = Some(flux.clone());
            result.failed_segment = Some(GrammarSegment::FluxName);
            result.reason = Some(RejectionReason::UnknownFlux { flux, gate });
        }
        result
    }

    /// Classification followed by the batch date guard. Only accepted files
    /// establish or check the expected reporting date.
    pub fn classify_in_batch(&self, filename: &str, batch: &mut BatchState) -> Classification {
        let mut result = self.classify(filename);
        if !result.accepted {
            return result;
        }
        if let Some(date) = result.reporting_date() {
            if let Err(mismatch) = batch.admit(date) {
                result.accepted = false;
                result.reason = Some(RejectionReason::DateMismatch {
                    observed: mismatch.observed,
                    expected: mismatch.expected,
                });
            }
        }
        result
    }

    /// Flux of a file whose name is not governed by the grammar: grammar first, then
    /// the longest declared flux name contained in the upper-cased filename.
    pub fn resolve_flux_loosely(&self, filename: &str) -> Option<String> {
        if let Ok(parsed) = self.rule.parse(filename) {
            return Some(self.store.canonical(&parsed.flux));
        }
        let upper = filename.to_uppercase();
        self.store
            .declared_fluxes()
            .filter(|flux| upper.contains(flux))
            .max_by_key(|flux| flux.len())
            .map(str::to_string)
    }

    fn classify_mismatch(&self, filename: &str, mismatch: NameMismatch) -> Classification {
        let (reason, failed_segment) = match mismatch {
            NameMismatch::Grammar { failed_segment } => {
                (RejectionReason::GrammarMismatch, failed_segment)
            }
            NameMismatch::InvalidDate(block) => {
                (RejectionReason::InvalidDate(block), Some(GrammarSegment::Dates))
            }
        };
        let mut result = Classification::rejected(reason);
        result.failed_segment = failed_segment;
        result.period = Period::sniff(filename);
        result.entity = EntityId::from_prefix(filename);
        result.best_guess_flux = self
            .simplified
            .extract(filename)
            .map(|name| self.store.canonical(&name));
        result
    }
}

/// Status of a record the classifier produced, for logging.
pub fn status_label(record: &FileRecord) -> &'static str {
    match record.status {
        FileStatus::Accepted => "accepted",
        FileStatus::Rejected => "rejected",
        FileStatus::Pending => "pending",
    }
}
