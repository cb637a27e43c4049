//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the tsumiki crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use tsumiki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = GeneratorConfig::from_file("path/to/config.json")?;
//! let workspace_json = std::fs::read_to_string("path/to/workspace.json")?;
//! let workspace: Workspace = serde_json::from_str(&workspace_json)?;
//!
//! let generator = Generator::new(config);
//! let java = generator.generate(&workspace)?;
//! println!("{}", java);
//! # Ok(())
//! # }
//! ```

// Generation
pub use crate::generator::{
    BlockEmitter, Emitted, Generation, GenerationRoot, Generator, GeneratorBuilder,
    workspace_from_json,
};

// Configuration
pub use crate::config::GeneratorConfig;

// Block graph
pub use crate::workspace::{
    Block, DisplayWorkspace, Input, InputKind, IntoWorkspace, Storage, VariableDecl, Workspace,
};

// Code building blocks
pub use crate::codegen::{HelperBody, HelperDefinition, NameCategory, Order, TypeMapping};

// Error types
pub use crate::error::{ConfigError, GenerateError, WorkspaceConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
