// fluxcheck/src/commands/audit.rs
//
// USE CASE: Content-only audit of the accepted folders.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::path::PathBuf;

use fluxcheck_core::application::run_content_audit;
use fluxcheck_core::domain::ledger::LedgerStatus;
use fluxcheck_core::infrastructure::adapters::CsvTableReader;

use crate::commands::load_workspace;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let workspace = load_workspace(&project_dir)?;
    println!("🔎 Auditing accepted files...");

    let reader = CsvTableReader::new(workspace.config.delimiter_byte());
    let result = run_content_audit(&workspace, &reader)?;

    let failures: Vec<_> = result
        .ledger
        .entries()
        .iter()
        .filter(|e| e.status == LedgerStatus::Failed)
        .collect();

    if !failures.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["File", "Reason"]);
        for entry in &failures {
            table.add_row(vec![
                entry.file_path.clone(),
                entry.reason.clone().unwrap_or_default(),
            ]);
        }
        println!("{table}");
    }

    println!(
        "   {} file(s) audited: {} passed, {} failed",
        result.ledger.len(),
        result.ledger.passed(),
        result.ledger.failed()
    );
    println!("📒 Ledger: {}", result.ledger_path.display());
    if let Some(report) = &result.report_path {
        println!("📝 Failure report: {}", report.display());
    }

    if result.ledger.conflicts() + result.ledger.move_failures() > 0 {
        eprintln!("\n❌ FAILURE. Some failing files could not be moved.");
        std::process::exit(1);
    }
    Ok(())
}
