// fluxcheck-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FluxError {
    // --- ERREURS DU DOMAINE (Cahier des charges, grammaire, règles) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for FluxError {
    fn from(err: std::io::Error) -> Self {
        FluxError::Infrastructure(InfrastructureError::Io(err))
    }
}
