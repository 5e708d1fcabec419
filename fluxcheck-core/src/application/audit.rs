// fluxcheck-core/src/application/audit.rs
//
// Content-only audit of files already sitting in the accepted roots. Filenames are not
// judged here: the flux is resolved as best as possible and only the content decides.

use std::path::PathBuf;
use tracing::{info, instrument, warn};

use crate::application::classification::NameClassifier;
use crate::application::pipeline::{check_content, file_name, settle};
use crate::application::report::{FailureReport, write_ledger};
use crate::application::workspace::Workspace;
use crate::domain::ledger::Ledger;
use crate::domain::naming::{EntityId, Period};
use crate::domain::ports::TableReader;
use crate::domain::record::FileRecord;
use crate::domain::validation::ContentValidator;
use crate::error::FluxError;
use crate::infrastructure::fs::list_files_recursive;

#[derive(Debug)]
pub struct AuditResult {
    pub ledger: Ledger,
    pub ledger_path: PathBuf,
    pub report_path: Option<PathBuf>,
}

#[instrument(skip_all, fields(project = ?workspace.project_dir))]
pub fn run_content_audit<R: TableReader>(
    workspace: &Workspace,
    reader: &R,
) -> Result<AuditResult, FluxError> {
    let classifier = NameClassifier::new(&workspace.config.naming, &workspace.store)?;
    let validator = ContentValidator::new();
    let mut ledger = Ledger::new();
    let mut report = FailureReport::new(workspace.audit_report_path());

    for root in workspace.plan.accepted_roots() {
        let files = list_files_recursive(root)?;
        info!(root = ?root, files = files.len(), "🔎 Auditing accepted files");

        for path in files {
            let filename = file_name(&path);
            let mut record = FileRecord::pending(&path);
            record.resolved_flux = classifier.resolve_flux_loosely(&filename);
            record.period = Period::sniff(&filename);
            record.entity = EntityId::from_prefix(&filename);
            record.accept();

            match &record.resolved_flux {
                Some(_) => check_content(&mut record, &workspace.store, reader, &validator),
                None => warn!(file = %filename, "⚠️ Flux not found in the cahier des charges, content not checked"),
            }

            if !record.is_accepted() {
                settle(&mut record, &workspace.plan);
            }
            let entry = ledger.record(record);
            report.append(entry)?;
        }
    }

    let ledger_path = workspace.audit_ledger_path();
    write_ledger(&ledger_path, &ledger)?;
    let report_path = report.finish()?;

    info!(
        passed = ledger.passed(),
        failed = ledger.failed(),
        "🏁 Audit finished"
    );

    Ok(AuditResult {
        ledger,
        ledger_path,
        report_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pipeline::run_batch;
    use crate::application::workspace::tests::config;
    use crate::domain::specification::store::tests::sample_document;
    use crate::infrastructure::adapters::CsvTableReader;
    use anyhow::Result;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn workspace(root: &Path) -> Result<Workspace> {
        Ok(Workspace::from_document(
            root,
            config("name: t\nspecification: cahier\n"),
            &sample_document(),
        )?)
    }

    #[test]
    fn test_audit_moves_only_failing_files() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        let ws = workspace(root)?;

        let ent = root.join("Q_FILES/ENT4");
        fs::create_dir_all(&ent)?;
        fs::write(
            ent.join("ENT-4_OCIANE_RC2_1_HONORAIRES_Q_20230101.csv"),
            "NUMERO_CONTRAT;DATE_EFFET;Remarque\nC1;20230101;a\nC2;20230101;b\n",
        )?;
        // Renamed by hand: resolved by name containment.
        fs::write(
            ent.join("honoraires_copie.csv"),
            "DATE_EFFET;Remarque\n20230101;a\n20230101;b\n",
        )?;
        fs::create_dir_all(root.join("M_FILES/NO_ENT"))?;
        fs::write(root.join("M_FILES/NO_ENT/unknown.csv"), "A\n1\n2\n")?;

        let result = run_content_audit(&ws, &CsvTableReader::new(b';'))?;
        assert_eq!(result.ledger.len(), 3);
        assert_eq!(result.ledger.passed(), 2);

        assert!(ent.join("ENT-4_OCIANE_RC2_1_HONORAIRES_Q_20230101.csv").exists());
        assert!(root.join("NO_MATCH/HONORAIRES/Other/honoraires_copie.csv").exists());
        assert!(root.join("M_FILES/NO_ENT/unknown.csv").exists());
        assert!(result.ledger_path.ends_with("reports/audit_results.json"));
        assert!(result
            .report_path
            .is_some_and(|p| p.ends_with("reports/audit_failed_files.txt")));
        Ok(())
    }

    #[test]
    fn test_clean_audit_keeps_run_artifacts() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        let ws = workspace(root)?;
        let reader = CsvTableReader::new(b';');

        fs::create_dir_all(root.join("data"))?;
        fs::write(
            root.join("data/ENT-4_OCIANE_RC2_1_HONORAIRES_Q_20230101.csv"),
            "NUMERO_CONTRAT;DATE_EFFET;Remarque\nC1;20230101;a\nC2;20230101;b\n",
        )?;
        fs::write(root.join("data/not_a_flux.txt"), "x")?;

        let run = run_batch(&ws, &reader)?;
        let run_report = run.report_path.clone().unwrap_or_default();
        assert!(run_report.exists());

        let audit = run_content_audit(&ws, &reader)?;
        assert_eq!(audit.ledger.failed(), 0);
        assert!(audit.report_path.is_none());

        assert!(run_report.exists());
        assert!(run.ledger_path.exists());
        assert!(audit.ledger_path.exists());
        assert_ne!(run.ledger_path, audit.ledger_path);
        Ok(())
    }
}
