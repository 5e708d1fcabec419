// fluxcheck/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fluxcheck")]
#[command(about = "Flux file classification & cahier des charges compliance", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Classifies, validates and routes every file of the data directory
    Run {
        /// Project directory (holds fluxcheck.yaml)
        #[arg(long, default_value = ".", env = "FLUXCHECK_PROJECT_DIR")]
        project_dir: PathBuf,
    },

    /// 🔎 Re-checks the content of files already in the accepted folders
    Audit {
        /// Project directory (holds fluxcheck.yaml)
        #[arg(long, default_value = ".", env = "FLUXCHECK_PROJECT_DIR")]
        project_dir: PathBuf,
    },

    /// 🏷️  Dry run of the naming rules on filenames (nothing is moved)
    Classify {
        /// Project directory (holds fluxcheck.yaml)
        #[arg(long, default_value = ".", env = "FLUXCHECK_PROJECT_DIR")]
        project_dir: PathBuf,

        /// Filenames to classify, in batch order
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// 📋 Shows the rules the cahier des charges declares for a flux
    Rules {
        /// Project directory (holds fluxcheck.yaml)
        #[arg(long, default_value = ".", env = "FLUXCHECK_PROJECT_DIR")]
        project_dir: PathBuf,

        /// Flux name, as in filenames or as the sheet is named (ex: "HONORAIRES")
        flux: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::try_parse_from(["fluxcheck", "run"])?;
        match args.command {
            Commands::Run { project_dir } => {
                assert_eq!(project_dir.to_string_lossy(), ".");
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_audit_project_dir() -> Result<()> {
        let args = Cli::try_parse_from(["fluxcheck", "audit", "--project-dir", "/tmp"])?;
        match args.command {
            Commands::Audit { project_dir } => {
                assert_eq!(project_dir.to_string_lossy(), "/tmp");
                Ok(())
            }
            _ => bail!("Expected Audit command"),
        }
    }

    #[test]
    fn test_cli_parse_classify_many() -> Result<()> {
        let args = Cli::try_parse_from([
            "fluxcheck",
            "classify",
            "OCIANE_RC2_1_HONORAIRES_Q_20230101.csv",
            "bad.txt",
        ])?;
        match args.command {
            Commands::Classify { filenames, .. } => {
                assert_eq!(filenames.len(), 2);
                assert_eq!(filenames[1], "bad.txt");
                Ok(())
            }
            _ => bail!("Expected Classify command"),
        }
    }

    #[test]
    fn test_cli_classify_requires_a_filename() {
        assert!(Cli::try_parse_from(["fluxcheck", "classify"]).is_err());
    }

    #[test]
    fn test_cli_parse_rules() -> Result<()> {
        let args = Cli::try_parse_from(["fluxcheck", "rules", "HONORAIRES"])?;
        match args.command {
            Commands::Rules { flux, .. } => {
                assert_eq!(flux, "HONORAIRES");
                Ok(())
            }
            _ => bail!("Expected Rules command"),
        }
    }
}
