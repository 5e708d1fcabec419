// fluxcheck-core/src/application/mod.rs

pub mod audit;
pub mod classification;
pub mod pipeline;
pub mod report;
pub mod workspace;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Cela permet au CLI de faire :
// `use fluxcheck_core::application::{run_batch, Workspace};`
// sans avoir à connaître la structure interne des fichiers.

pub use audit::{AuditResult, run_content_audit};
pub use classification::{Classification, NameClassifier};
pub use pipeline::{RunResult, run_batch};
pub use workspace::Workspace;
