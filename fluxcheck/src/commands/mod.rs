// fluxcheck/src/commands/mod.rs

pub mod audit;
pub mod classify;
pub mod rules;
pub mod run;

use anyhow::Context;
use std::path::Path;

use fluxcheck_core::application::Workspace;

/// Shared first step of every command.
pub fn load_workspace(project_dir: &Path) -> anyhow::Result<Workspace> {
    println!("⚙️  Loading configuration...");
    let workspace = Workspace::load(project_dir).with_context(|| {
        format!(
            "Failed to load project from {:?}",
            project_dir
        )
    })?;
    println!(
        "   Project: {} | {} flux declared, {} sanctioned",
        workspace.config.name,
        workspace.store.declared_fluxes().count(),
        workspace.store.sanctioned_fluxes().count()
    );
    Ok(workspace)
}
