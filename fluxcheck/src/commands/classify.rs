// fluxcheck/src/commands/classify.rs
//
// USE CASE: Dry run of the naming rules. Nothing is read or moved.

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::path::PathBuf;

use fluxcheck_core::application::NameClassifier;
use fluxcheck_core::domain::batch::BatchState;

use crate::commands::load_workspace;

pub fn execute(project_dir: PathBuf, filenames: Vec<String>) -> anyhow::Result<()> {
    let workspace = load_workspace(&project_dir)?;
    let classifier = NameClassifier::new(&workspace.config.naming, &workspace.store)?;
    let mut batch = BatchState::new();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["File", "Status", "Flux", "Period", "Entity", "Date", "Detail"]);

    for filename in &filenames {
        let result = classifier.classify_in_batch(filename, &mut batch);
        let status = if result.accepted { "ACCEPTED" } else { "REJECTED" };
        let flux = result
            .resolved_flux
            .clone()
            .or_else(|| result.best_guess_flux.as_ref().map(|f| format!("{f}?")))
            .unwrap_or_else(|| "-".to_string());
        let detail = match (&result.reason, result.failed_segment) {
            (Some(reason), Some(segment)) => format!("{reason} [{segment}]"),
            (Some(reason), None) => reason.to_string(),
            (None, _) => String::new(),
        };

        table.add_row(vec![
            filename.clone(),
            status.to_string(),
            flux,
            result.period.map(|p| p.code().to_string()).unwrap_or_else(|| "-".to_string()),
            result.entity.map(|e| e.to_string()).unwrap_or_else(|| "-".to_string()),
            result
                .reporting_date()
                .map(|d| d.format("%Y%m%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            detail,
        ]);
    }

    println!("{table}");
    Ok(())
}
