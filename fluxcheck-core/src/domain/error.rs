// fluxcheck-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Specification document unreadable: {0}")]
    #[diagnostic(
        code(fluxcheck::domain::specification),
        help("Check the 'specification' path in fluxcheck.yaml and the document format.")
    )]
    SpecificationUnreadable(String),

    #[error("Notice sheet '{0}' not found in the specification document")]
    #[diagnostic(
        code(fluxcheck::domain::notice),
        help("The Notice sheet lists the sanctioned flux names; without it no file can be governed.")
    )]
    NoticeMissing(String),

    #[error("Notice sheet '{0}' does not list any sanctioned flux")]
    #[diagnostic(code(fluxcheck::domain::notice_empty))]
    NoticeEmpty(String),

    #[error("No rules declared for flux '{0}'")]
    #[diagnostic(code(fluxcheck::domain::flux_not_found))]
    FluxNotFound(String),

    #[error("Ambiguous alias mapping: '{name}' maps to both '{first}' and '{second}'")]
    #[diagnostic(
        code(fluxcheck::domain::alias),
        help("Each sheet name must map to exactly one flux name and vice versa.")
    )]
    AmbiguousAlias {
        name: String,
        first: String,
        second: String,
    },

    #[error("Cyclic alias mapping involving '{0}'")]
    #[diagnostic(code(fluxcheck::domain::alias_cycle))]
    CyclicAlias(String),

    #[error("Invalid naming grammar: {0}")]
    #[diagnostic(
        code(fluxcheck::domain::grammar),
        help("Check naming.provider and naming.extension in fluxcheck.yaml.")
    )]
    InvalidGrammar(String),

    #[error("Unreadable file content: {0}")]
    #[diagnostic(code(fluxcheck::domain::content))]
    UnreadableContent(String),
}
