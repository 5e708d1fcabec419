// fluxcheck-core/src/domain/naming/mod.rs

pub mod grammar;
pub mod period;
pub mod segment;
pub mod simplified;

pub use grammar::{NameMismatch, NamingRule, ParsedName};
pub use period::{EntityId, Period};
pub use segment::GrammarSegment;
pub use simplified::SimplifiedNameExtractor;
