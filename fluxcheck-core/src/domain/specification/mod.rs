// fluxcheck-core/src/domain/specification/mod.rs

pub mod alias;
pub mod document;
pub mod field;
pub mod layout;
pub mod store;
pub mod tokens;

pub use alias::{AliasPair, AliasTable};
pub use document::{Sheet, SpecificationDocument};
pub use field::{FieldRule, FieldType};
pub use layout::{SheetGrid, SheetLayout};
pub use store::{FluxSpecification, SpecificationStore, StoreOptions};
