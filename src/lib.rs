//! # Tsumiki - Block Graph to Java Code Generator
//!
//! **Tsumiki** turns the block programs of a visual editor into a complete Java
//! class. Blocks are connected through named value and statement inputs and
//! chained through `next` links; the generator walks this graph, writes every
//! block as Java source and wraps the result with the imports, fields and
//! helper methods the emitted code relies on.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Blocks**: Deserialize a workspace from JSON, or implement `IntoWorkspace` for your own editor format.
//! 2.  **Configure**: Describe the generated class (name, package, metadata) in a `GeneratorConfig`.
//! 3.  **Build a Generator**: Use `Generator::builder` to register custom block emitters, type mappings and aliases.
//! 4.  **Generate**: Call `generate` for every workspace. Each run starts from clean name, import and helper registries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tsumiki::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let program = Block::new("1", "variables_set")
//!         .with_field("VAR", "greeting")
//!         .with_value("VALUE", Block::new("2", "text").with_field("TEXT", "Hello").with_output(&["String"]))
//!         .with_next(
//!             Block::new("3", "text_print")
//!                 .with_value("TEXT", Block::new("4", "variables_get").with_field("VAR", "greeting")),
//!         );
//!     let workspace = Workspace::from_block(program);
//!
//!     let config = GeneratorConfig {
//!         class_name: "HelloExtension".to_string(),
//!         ..GeneratorConfig::default()
//!     };
//!     let generator = Generator::builder(config).build();
//!
//!     let java = generator.generate(&workspace)?;
//!     println!("{}", java);
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod generator;
pub mod prelude;
pub mod workspace;
