use crate::codegen::{TypeMapping, TypeTable};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::workspace::{Block, Workspace};
use itertools::Itertools;

mod assembler;
mod blocks;
pub mod context;
pub mod emitters;
mod walker;

pub use assembler::{REQUIRED_IMPORTS, collapse_blank_lines};
pub use context::{Generation, prefix_lines};
pub use emitters::{BlockEmitter, Emitted, EmitterRegistry, VariableAssignment};
pub use walker::TO_STRING_HELPER;

use blocks::{create_emitter_by_name, register_default_emitters};

/// What a generation run starts from.
#[derive(Debug, Clone, Copy)]
pub enum GenerationRoot<'a> {
    Block(&'a Block),
    Workspace(&'a Workspace),
}

impl<'a> From<&'a Block> for GenerationRoot<'a> {
    fn from(block: &'a Block) -> Self {
        GenerationRoot::Block(block)
    }
}

impl<'a> From<&'a Workspace> for GenerationRoot<'a> {
    fn from(workspace: &'a Workspace) -> Self {
        GenerationRoot::Workspace(workspace)
    }
}

/// Turns block workspaces into Java classes.
///
/// A `Generator` holds only immutable setup; every call to `generate` builds
/// its own `Generation` context, so one generator can serve many runs.
pub struct Generator {
    config: GeneratorConfig,
    emitters: EmitterRegistry,
    type_table: TypeTable,
}

pub struct GeneratorBuilder {
    config: GeneratorConfig,
    emitters: EmitterRegistry,
    type_table: TypeTable,
}

impl GeneratorBuilder {
    pub fn new(config: GeneratorConfig) -> Self {
        let mut emitters = EmitterRegistry::new();
        register_default_emitters(&mut emitters);
        Self {
            config,
            emitters,
            type_table: TypeTable::default(),
        }
    }

    /// Emits blocks of `user_block_type` with the built-in emitter for `builtin_block_type`.
    pub fn with_block_mapping(mut self, user_block_type: &str, builtin_block_type: &str) -> Self {
        match create_emitter_by_name(builtin_block_type) {
            Some(emitter) => {
                self.emitters.insert(user_block_type.to_string(), emitter);
            }
            None => log::warn!(
                "Cannot map '{}' to unknown built-in block type '{}'",
                user_block_type,
                builtin_block_type
            ),
        }
        self
    }

    /// Registers (or replaces) the emitter for the block type it reports.
    pub fn with_emitter(mut self, emitter: Box<dyn BlockEmitter>) -> Result<Self, GenerateError> {
        let block_type = emitter.block_type().trim().to_string();
        if block_type.is_empty() {
            return Err(GenerateError::InvalidArgument(
                "a block emitter must report a non-empty block type".to_string(),
            ));
        }
        self.emitters.insert(block_type, emitter);
        Ok(self)
    }

    pub fn with_type_mapping(mut self, logical_type: &str, mapping: TypeMapping) -> Self {
        self.type_table.insert_mapping(logical_type, mapping);
        self
    }

    pub fn with_type_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.type_table.insert_alias(alias, canonical);
        self
    }

    pub fn build(self) -> Generator {
        Generator {
            config: self.config,
            emitters: self.emitters,
            type_table: self.type_table,
        }
    }
}

impl Generator {
    pub fn builder(config: GeneratorConfig) -> GeneratorBuilder {
        GeneratorBuilder::new(config)
    }

    /// A generator with the default emitters and type table.
    pub fn new(config: GeneratorConfig) -> Self {
        GeneratorBuilder::new(config).build()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn has_emitter(&self, block_type: &str) -> bool {
        self.emitters.contains_key(block_type)
    }

    /// Generates the complete Java compilation unit for `root`.
    pub fn generate<'r>(&self, root: impl Into<GenerationRoot<'r>>) -> Result<String, GenerateError> {
        let mut workspace = match root.into() {
            GenerationRoot::Block(block) => Workspace::from_block(block.clone()),
            GenerationRoot::Workspace(workspace) => workspace.clone(),
        };
        log::debug!(
            "Generating class '{}' from {} top-level block(s)",
            self.config.class_name,
            workspace.blocks.len()
        );

        // 1. Fresh per-run registries
        let mut generation = Generation::new(&self.config, &self.emitters, &self.type_table);

        // 2. Let change-reactive blocks stabilise before anything reads them
        self.settle(&mut workspace);

        // 3. Types and names of every variable, before any code depends on them
        generation.init_variables(&workspace);

        // 4. Body; imports, helpers and names accumulate as side effects
        let body = workspace
            .blocks
            .iter()
            .map(|block| generation.block_to_code(block))
            .filter(|code| !code.trim().is_empty())
            .join("\n");

        // 5. Imports, fields, helpers and the class wrapper
        Ok(assembler::assemble(&mut generation, &body))
    }

    /// Generates from a JSON value holding either a workspace or a single block.
    ///
    /// The root is read with [`workspace_from_json`]; anything it rejects is
    /// rejected here without producing output.
    pub fn generate_json(&self, root: &serde_json::Value) -> Result<String, GenerateError> {
        self.generate(&workspace_from_json(root)?)
    }

    fn settle(&self, workspace: &mut Workspace) {
        for top in &mut workspace.blocks {
            top.walk_mut(&mut |block| {
                if let Some(emitter) = self.emitters.get(&block.block_type) {
                    emitter.settle(block);
                }
            });
        }
    }
}

/// Reads a JSON root holding either a workspace or a single block.
///
/// Objects with a `blocks` array are workspaces, objects with a string `type`
/// are blocks and are wrapped into a one-block workspace. Anything else fails
/// with [`GenerateError::UnrecognizedRoot`].
pub fn workspace_from_json(root: &serde_json::Value) -> Result<Workspace, GenerateError> {
    let object = root
        .as_object()
        .ok_or_else(|| GenerateError::UnrecognizedRoot(describe_json(root)))?;

    if object.get("blocks").is_some_and(serde_json::Value::is_array) {
        serde_json::from_value(root.clone()).map_err(|e| {
            GenerateError::UnrecognizedRoot(format!("a malformed workspace ({})", e))
        })
    } else if object.get("type").is_some_and(serde_json::Value::is_string) {
        let block: Block = serde_json::from_value(root.clone()).map_err(|e| {
            GenerateError::UnrecognizedRoot(format!("a malformed block ({})", e))
        })?;
        Ok(Workspace::from_block(block))
    } else {
        Err(GenerateError::UnrecognizedRoot(describe_json(root)))
    }
}

/// A short description of an unexpected JSON root for error messages.
fn describe_json(value: &serde_json::Value) -> String {
    let kind = match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object without 'blocks' or 'type'",
    };
    let mut text = value.to_string();
    if text.len() > 60 {
        let cut = (0..=60).rev().find(|i| text.is_char_boundary(*i)).unwrap_or(0);
        text.truncate(cut);
        text.push_str("...");
    }
    format!("{} `{}`", kind, text)
}
