// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use crate::domain::naming::grammar::{DEFAULT_EXTENSION, DEFAULT_PROVIDER};
use crate::domain::routing::RoutingPlan;
use crate::domain::specification::alias::AliasPair;
use crate::domain::specification::store::DEFAULT_NOTICE_SHEET;

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct ProjectConfig {
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub name: String,

    /// Directory holding the candidate flux files of the batch.
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: String,

    /// Cahier des charges: a directory of sheet files, or a workbook.
    #[validate(length(min = 1, message = "Specification path cannot be empty"))]
    pub specification: String,

    #[validate(custom(function = "validate_delimiter"))]
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[validate(nested)]
    #[serde(default)]
    pub naming: NamingConfig,

    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub aliases: Vec<AliasPair>,
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct NamingConfig {
    #[validate(length(min = 1, message = "Provider cannot be empty"))]
    #[serde(default = "default_provider")]
    pub provider: String,

    #[validate(length(min = 1, message = "Extension cannot be empty"))]
    #[serde(default = "default_extension")]
    pub extension: String,

    #[validate(length(min = 1))]
    #[serde(rename = "notice-sheet", default = "default_notice_sheet")]
    pub notice_sheet: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            extension: default_extension(),
            notice_sheet: default_notice_sheet(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone)]
pub struct OutputConfig {
    #[validate(length(min = 1))]
    #[serde(rename = "monthly-root", default = "default_monthly_root")]
    pub monthly_root: String,

    #[validate(length(min = 1))]
    #[serde(rename = "quarterly-root", default = "default_quarterly_root")]
    pub quarterly_root: String,

    #[validate(length(min = 1))]
    #[serde(rename = "rejected-root", default = "default_rejected_root")]
    pub rejected_root: String,

    #[serde(rename = "report-file", default = "default_report_file")]
    pub report_file: String,

    #[serde(default = "default_ledger")]
    pub ledger: String,

    #[serde(rename = "audit-ledger", default = "default_audit_ledger")]
    pub audit_ledger: String,

    /// Failure report of the audit, kept apart from the run's.
    #[serde(rename = "audit-report-file", default = "default_audit_report_file")]
    pub audit_report_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            monthly_root: default_monthly_root(),
            quarterly_root: default_quarterly_root(),
            rejected_root: default_rejected_root(),
            report_file: default_report_file(),
            ledger: default_ledger(),
            audit_ledger: default_audit_ledger(),
            audit_report_file: default_audit_report_file(),
        }
    }
}

impl ProjectConfig {
    /// Single-byte field delimiter (validated).
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b';')
    }

    pub fn routing_plan(&self, project_dir: &Path) -> RoutingPlan {
        RoutingPlan {
            monthly_root: resolve(project_dir, &self.output.monthly_root),
            quarterly_root: resolve(project_dir, &self.output.quarterly_root),
            rejected_root: resolve(project_dir, &self.output.rejected_root),
        }
    }

    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.data_dir)
    }

    pub fn specification_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.specification)
    }

    pub fn report_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.output.report_file)
    }

    pub fn ledger_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.output.ledger)
    }

    pub fn audit_ledger_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.output.audit_ledger)
    }

    pub fn audit_report_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.output.audit_report_file)
    }
}

/// Relative paths are anchored at the project directory.
fn resolve(project_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

fn validate_delimiter(delimiter: &str) -> Result<(), ValidationError> {
    if delimiter.len() == 1 && delimiter.is_ascii() {
        Ok(())
    } else {
        Err(ValidationError::new("delimiter_must_be_one_ascii_char"))
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_delimiter() -> String {
    ";".to_string()
}
fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}
fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}
fn default_notice_sheet() -> String {
    DEFAULT_NOTICE_SHEET.to_string()
}
fn default_monthly_root() -> String {
    "M_FILES".to_string()
}
fn default_quarterly_root() -> String {
    "Q_FILES".to_string()
}
fn default_rejected_root() -> String {
    "NO_MATCH".to_string()
}
fn default_report_file() -> String {
    "reports/failed_files.txt".to_string()
}
fn default_ledger() -> String {
    "reports/test_results.json".to_string()
}
fn default_audit_ledger() -> String {
    "reports/audit_results.json".to_string()
}
fn default_audit_report_file() -> String {
    "reports/audit_failed_files.txt".to_string()
}
