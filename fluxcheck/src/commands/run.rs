// fluxcheck/src/commands/run.rs
//
// USE CASE: Full run over the data directory.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::path::PathBuf;

use fluxcheck_core::application::run_batch;
use fluxcheck_core::infrastructure::adapters::CsvTableReader;

use crate::commands::load_workspace;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let workspace = load_workspace(&project_dir)?;

    println!("🚀 Processing {}...", workspace.data_dir().display());
    let reader = CsvTableReader::new(workspace.config.delimiter_byte());

    match run_batch(&workspace, &reader) {
        Ok(result) => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Total", "Passed", "Failed", "Conflicts", "Not moved", "Reporting date"]);
            table.add_row(vec![
                result.ledger.len().to_string(),
                result.ledger.passed().to_string(),
                result.ledger.failed().to_string(),
                result.ledger.conflicts().to_string(),
                result.ledger.move_failures().to_string(),
                result
                    .expected_reporting_date
                    .map(|d| d.format("%Y%m%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
            println!("{table}");

            println!("📒 Ledger: {}", result.ledger_path.display());
            if let Some(report) = &result.report_path {
                println!("📝 Failure report: {}", report.display());
            }

            if result.success() {
                println!("\n✨ SUCCESS! Run finished in {:.2?}", start.elapsed());
            } else {
                if result.ledger.conflicts() > 0 {
                    eprintln!(
                        "\n❌ FAILURE. {} file(s) left in place: destination already exists.",
                        result.ledger.conflicts()
                    );
                }
                if result.ledger.move_failures() > 0 {
                    eprintln!(
                        "\n❌ FAILURE. {} file(s) could not be moved, see the failure report.",
                        result.ledger.move_failures()
                    );
                }
                // Exit with error code for CI/CD
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL RUN ERROR: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
