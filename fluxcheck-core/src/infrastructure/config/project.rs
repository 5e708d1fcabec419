// fluxcheck-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["fluxcheck.yaml", "fluxcheck.yml"];

pub const ENV_DATA_DIR: &str = "FLUXCHECK_DATA_DIR";
pub const ENV_SPECIFICATION: &str = "FLUXCHECK_SPECIFICATION";

// --- LOADER ---

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    // 2. Chargement YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    // 3. Override via variables d'environnement (layering)
    // FLUXCHECK_DATA_DIR=/mnt/inbox fluxcheck run
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    // 4. Validation (Fail-Secure): une config invalide arrête tout avant le moindre move
    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_DATA_DIR) {
        info!(old = ?config.data_dir, new = ?val, "Overriding data dir via ENV");
        config.data_dir = val;
    }
    if let Some(val) = lookup(ENV_SPECIFICATION) {
        info!(old = ?config.specification, new = ?val, "Overriding specification via ENV");
        config.specification = val;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_yml_candidate() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("fluxcheck.yml"),
            "name: reporting\nspecification: cahier\ndelimiter: ','\n",
        )?;
        let config = load_project_config(dir.path())?;
        assert_eq!(config.name, "reporting");
        assert_eq!(config.delimiter_byte(), b',');
        Ok(())
    }

    #[test]
    fn test_missing_config_is_reported() -> Result<()> {
        let dir = tempdir()?;
        let err = load_project_config(dir.path()).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigNotFound(_)));
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("fluxcheck.yaml"),
            "name: ''\nspecification: cahier\n",
        )?;
        let err = load_project_config(dir.path()).unwrap_err();
        assert!(matches!(err, InfrastructureError::ConfigError(_)));
        Ok(())
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let mut config: ProjectConfig =
            serde_yaml::from_str("name: r\nspecification: cahier\n")?;
        apply_env_overrides(&mut config, |key| match key {
            ENV_DATA_DIR => Some("/mnt/inbox".to_string()),
            _ => None,
        });
        assert_eq!(config.data_dir, "/mnt/inbox");
        assert_eq!(config.specification, "cahier");
        Ok(())
    }
}
