pub mod batch;
pub mod error;
pub mod ledger;
pub mod naming;
pub mod ports;
pub mod project;
pub mod record;
pub mod routing;
pub mod specification;
pub mod validation;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
