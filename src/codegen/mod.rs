//! Leaf building blocks of Java generation, independent of the block graph.
pub mod helpers;
pub mod imports;
pub mod literal;
pub mod names;
pub mod order;
pub mod types;

pub use helpers::{HelperBody, HelperDefinition, HelperParam, HelperRegistry, ProvidedHelper};
pub use imports::ImportRegistry;
pub use literal::{javadoc_text, quote};
pub use names::{NameCategory, NameRegistry};
pub use order::{Order, needs_parens};
pub use types::{MappedType, TypeMapping, TypeTable, UNKNOWN_TYPE, VARIANT_TYPE};
