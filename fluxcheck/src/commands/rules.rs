// fluxcheck/src/commands/rules.rs
//
// USE CASE: Show the resolved rules of one flux.

use anyhow::Context;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::path::PathBuf;

use crate::commands::load_workspace;

pub fn execute(project_dir: PathBuf, flux: String) -> anyhow::Result<()> {
    let workspace = load_workspace(&project_dir)?;
    let spec = workspace
        .store
        .rules_for(&flux)
        .with_context(|| format!("No usable rules for flux '{}'", flux))?;

    println!("\n📋 Flux: {}", spec.canonical_name);
    if !spec.aliases.is_empty() {
        let aliases: Vec<&str> = spec.aliases.iter().map(String::as_str).collect();
        println!("   Also known as: {}", aliases.join(", "));
    }
    println!(
        "   Sanctioned by the Notice: {}",
        if workspace.store.is_sanctioned(&spec.canonical_name) { "yes" } else { "no" }
    );
    println!("   Mandatory fields: {}", spec.mandatory_fields.join(", "));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Field", "Type", "Declared length", "Enforced length", "Mandatory"]);
    for rule in &spec.field_rules {
        table.add_row(vec![
            rule.name.clone(),
            rule.declared_type.to_string(),
            rule.max_length.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            rule.effective_max_length()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            if spec.is_mandatory(&rule.name) { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
