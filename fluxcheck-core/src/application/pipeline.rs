// fluxcheck-core/src/application/pipeline.rs

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

use crate::application::classification::{NameClassifier, status_label};
use crate::application::report::{FailureReport, write_ledger};
use crate::application::workspace::Workspace;
use crate::domain::batch::BatchState;
use crate::domain::error::DomainError;
use crate::domain::ledger::Ledger;
use crate::domain::ports::TableReader;
use crate::domain::record::{FileRecord, RejectionReason, RoutingFailure};
use crate::domain::routing::RoutingPlan;
use crate::domain::specification::SpecificationStore;
use crate::domain::validation::{ContentValidator, ContentVerdict};
use crate::error::FluxError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{list_files, move_without_overwrite};

/// Summary of a full run.
#[derive(Debug)]
pub struct RunResult {
    pub ledger: Ledger,
    pub expected_reporting_date: Option<NaiveDate>,
    pub ledger_path: PathBuf,
    /// `None` when no file failed.
    pub report_path: Option<PathBuf>,
}

impl RunResult {
    /// Every file ended where its outcome says.
    pub fn success(&self) -> bool {
        self.ledger.conflicts() == 0 && self.ledger.move_failures() == 0
    }
}

/// Full run: classification, batch guard, content checks, routing, ledger and report.
/// Files are visited in file-name order; the first accepted one fixes the batch date.
#[instrument(skip_all, fields(project = ?workspace.project_dir))]
pub fn run_batch<R: TableReader>(workspace: &Workspace, reader: &R) -> Result<RunResult, FluxError> {
    let data_dir = workspace.data_dir();
    let spec_path = workspace.specification_path();
    let classifier = NameClassifier::new(&workspace.config.naming, &workspace.store)?;
    let validator = ContentValidator::new();

    let mut batch = BatchState::new();
    let mut ledger = Ledger::new();
    let mut report = FailureReport::new(workspace.report_path());

    let files: Vec<PathBuf> = list_files(&data_dir)?
        .into_iter()
        .filter(|p| *p != spec_path)
        .collect();
    info!(dir = ?data_dir, files = files.len(), "🚀 Starting flux run");

    for path in files {
        let filename = file_name(&path);
        let mut record = classifier
            .classify_in_batch(&filename, &mut batch)
            .into_record(&path);

        if record.is_accepted() {
            check_content(&mut record, &workspace.store, reader, &validator);
        }

        settle(&mut record, &workspace.plan);
        info!(file = %record.filename, status = status_label(&record), "Classified");

        let entry = ledger.record(record);
        report.append(entry)?;
    }

    let ledger_path = workspace.ledger_path();
    write_ledger(&ledger_path, &ledger)?;
    let report_path = report.finish()?;

    info!(
        passed = ledger.passed(),
        failed = ledger.failed(),
        conflicts = ledger.conflicts(),
        move_failures = ledger.move_failures(),
        "🏁 Run finished"
    );

    Ok(RunResult {
        ledger,
        expected_reporting_date: batch.expected_reporting_date(),
        ledger_path,
        report_path,
    })
}

/// Content checks of an accepted record. May flip it to rejected.
/// The file is always read, even when its flux has no usable rules.
pub(crate) fn check_content<R: TableReader>(
    record: &mut FileRecord,
    store: &SpecificationStore,
    reader: &R,
    validator: &ContentValidator,
) {
    let Some(flux) = record.resolved_flux.clone() else {
        return;
    };

    let table = match reader.read(&record.source) {
        Ok(table) => table,
        Err(e) => {
            error!(file = %record.filename, error = %e, "Unreadable file");
            record.reject(RejectionReason::UnreadableContent(e.to_string()));
            return;
        }
    };

    let spec = match store.rules_for(&flux) {
        Ok(spec) => spec,
        Err(DomainError::FluxNotFound(_)) => {
            warn!(file = %record.filename, flux = %flux, "⚠️ No usable rules for flux, content checks skipped");
            return;
        }
        Err(e) => {
            record.reject(RejectionReason::UnreadableContent(e.to_string()));
            return;
        }
    };

    match validator.validate(&table, spec) {
        ContentVerdict::SingleRow | ContentVerdict::Valid => {}
        ContentVerdict::MissingFields(fields) => {
            record.reject(RejectionReason::MissingFields { flux, fields });
        }
        ContentVerdict::Violations { length, types } => {
            record.reject(RejectionReason::ContentViolations { length, types });
        }
    }
}

/// Moves the file where its record says it belongs. When the move does not happen
/// the file stays where it is and the record keeps why; the batch goes on.
pub(crate) fn settle(record: &mut FileRecord, plan: &RoutingPlan) {
    let destination = plan.destination(record);
    match move_without_overwrite(&record.source, &destination) {
        Ok(()) => record.destination = Some(destination),
        Err(InfrastructureError::DestinationExists(existing)) => {
            error!(file = %record.filename, destination = ?existing, "⛔ Destination already exists, file left in place");
            record.mark_unrouted(RoutingFailure::DestinationExists(existing));
        }
        Err(e) => {
            error!(file = %record.filename, destination = ?destination, error = %e, "⛔ Move failed, file left in place");
            record.mark_unrouted(RoutingFailure::MoveFailed {
                destination,
                message: e.to_string(),
            });
        }
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
