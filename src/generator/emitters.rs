use super::context::Generation;
use crate::codegen::Order;
use crate::workspace::Block;
use ahash::AHashMap;

/// What a block produces when asked for its own code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// An inline expression and the precedence of its outermost operator.
    Expression(String, Order),
    /// One or more complete statements, each line terminated by a newline.
    Statement(String),
}

impl Emitted {
    pub fn expression(code: impl Into<String>, order: Order) -> Self {
        Emitted::Expression(code.into(), order)
    }

    pub fn statement(code: impl Into<String>) -> Self {
        Emitted::Statement(code.into())
    }
}

/// A block that stores the value connected to `value_input` into `variable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableAssignment {
    pub variable: String,
    pub value_input: String,
}

/// Defines the contract for turning one block type into Java code.
///
/// Emitters only produce the block's own fragment. Comments, successors and
/// parenthesisation are handled by the walker in `Generation`.
pub trait BlockEmitter: Send + Sync {
    fn block_type(&self) -> &str;

    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted;

    /// Normalises change-reactive block state before any code is emitted.
    fn settle(&self, _block: &mut Block) {}

    /// Reports a variable write so its type can be inferred before emission.
    fn assigned_variable(&self, _block: &Block) -> Option<VariableAssignment> {
        None
    }
}

pub type EmitterRegistry = AHashMap<String, Box<dyn BlockEmitter>>;
