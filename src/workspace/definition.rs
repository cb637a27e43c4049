use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Whether an input slot takes an expression or a nested statement chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Value,
    Statement,
}

/// A named input slot on a block, optionally connected to a child block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,
    pub kind: InputKind,
    #[serde(default)]
    pub block: Option<Box<Block>>,
}

/// A single unit of the visual program.
///
/// Blocks own their children, so a block can never be its own ancestor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub fields: AHashMap<String, serde_json::Value>,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub next: Option<Box<Block>>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Output type check. `Some` iff the block is an expression; an empty list means untyped.
    #[serde(default)]
    pub output: Option<Vec<String>>,
    #[serde(default)]
    pub disabled: bool,
}

impl Block {
    pub fn new(id: &str, block_type: &str) -> Self {
        Self {
            id: id.to_string(),
            block_type: block_type.to_string(),
            fields: AHashMap::new(),
            inputs: Vec::new(),
            next: None,
            comment: None,
            output: None,
            disabled: false,
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_value(mut self, name: &str, block: Block) -> Self {
        self.set_input(name, InputKind::Value, Some(block));
        self
    }

    pub fn with_statement(mut self, name: &str, block: Block) -> Self {
        self.set_input(name, InputKind::Statement, Some(block));
        self
    }

    pub fn with_next(mut self, block: Block) -> Self {
        self.next = Some(Box::new(block));
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_output(mut self, types: &[&str]) -> Self {
        self.output = Some(types.iter().map(|t| t.to_string()).collect());
        self
    }

    fn set_input(&mut self, name: &str, kind: InputKind, block: Option<Block>) {
        let block = block.map(Box::new);
        match self.inputs.iter_mut().find(|i| i.name == name) {
            Some(input) => {
                input.kind = kind;
                input.block = block;
            }
            None => self.inputs.push(Input {
                name: name.to_string(),
                kind,
                block,
            }),
        }
    }

    pub fn is_expression(&self) -> bool {
        self.output.is_some()
    }

    /// The single declared output type, if exactly one is declared.
    pub fn output_type(&self) -> Option<&str> {
        match self.output.as_deref() {
            Some([single]) => Some(single.as_str()),
            _ => None,
        }
    }

    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|i| i.name == name)
    }

    /// The block connected to input `name`, if any.
    pub fn input_block(&self, name: &str) -> Option<&Block> {
        self.input(name).and_then(|i| i.block.as_deref())
    }

    pub fn value_inputs(&self) -> impl Iterator<Item = &Input> {
        self.inputs.iter().filter(|i| i.kind == InputKind::Value)
    }

    /// A field rendered as text. Strings come back unquoted; numbers and booleans as written.
    pub fn field_text(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Visits this block, its inputs and its successors depth-first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Block)) {
        visit(self);
        for child in self.inputs.iter().filter_map(|i| i.block.as_deref()) {
            child.walk(visit);
        }
        if let Some(next) = &self.next {
            next.walk(visit);
        }
    }

    /// Mutable counterpart of `walk`.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Block)) {
        visit(self);
        for child in self.inputs.iter_mut().filter_map(|i| i.block.as_deref_mut()) {
            child.walk_mut(visit);
        }
        if let Some(next) = self.next.as_deref_mut() {
            next.walk_mut(visit);
        }
    }
}

/// Where a variable lives in the generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Storage {
    /// Becomes a field of the generated class.
    #[default]
    Global,
    /// Declared by the block that introduces it (parameters, loop counters).
    Local,
}

/// A variable visible to the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    #[serde(default, rename = "type")]
    pub var_type: Option<String>,
    #[serde(default)]
    pub storage: Storage,
    /// Java expression used to initialise the field, overriding the per-type default.
    #[serde(default)]
    pub initializer: Option<String>,
}

impl VariableDecl {
    pub fn global(name: &str, var_type: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            var_type: var_type.map(str::to_string),
            storage: Storage::Global,
            initializer: None,
        }
    }
}

/// The complete program graph: top-level block chains plus their variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub variables: Vec<VariableDecl>,
}

impl Workspace {
    /// Wraps a lone block into a workspace with no declared variables.
    pub fn from_block(block: Block) -> Self {
        Self {
            blocks: vec![block],
            variables: Vec::new(),
        }
    }

    pub fn all_blocks(&self) -> Vec<&Block> {
        let mut all = Vec::new();
        for top in &self.blocks {
            top.walk(&mut |b| all.push(b));
        }
        all
    }
}
