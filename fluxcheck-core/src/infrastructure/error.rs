// fluxcheck-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(fluxcheck::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Destination already exists: {0}")]
    #[diagnostic(
        code(fluxcheck::infra::destination_exists),
        help("Files are never overwritten. Move or delete the existing file, then re-run.")
    )]
    DestinationExists(PathBuf),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(fluxcheck::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(fluxcheck::infra::config))]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(fluxcheck::infra::config_missing))]
    ConfigNotFound(String),

    // --- LEDGER ---
    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(fluxcheck::infra::json))]
    JsonError(#[from] serde_json::Error),

    // --- TABULAR FILES ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(fluxcheck::infra::csv),
        help("Check the delimiter configured in fluxcheck.yaml and the file encoding (UTF-8).")
    )]
    CsvError(#[from] csv::Error),

    #[cfg(feature = "excel")]
    #[error("Workbook Error: {0}")]
    #[diagnostic(code(fluxcheck::infra::workbook))]
    WorkbookError(#[from] calamine::Error),

    #[error("Unsupported specification document: {0}")]
    #[diagnostic(
        code(fluxcheck::infra::unsupported_document),
        help("Use a directory of sheet files, or build with the 'excel' feature to read workbooks.")
    )]
    UnsupportedDocument(String),
}
