//! Common test utilities for building block workspaces.
use tsumiki::prelude::*;

#[allow(dead_code)]
pub fn number(id: &str, value: f64) -> Block {
    Block::new(id, "math_number")
        .with_field("NUM", value)
        .with_output(&["Number"])
}

#[allow(dead_code)]
pub fn text(id: &str, value: &str) -> Block {
    Block::new(id, "text")
        .with_field("TEXT", value)
        .with_output(&["String"])
}

#[allow(dead_code)]
pub fn get(id: &str, var: &str) -> Block {
    Block::new(id, "variables_get")
        .with_field("VAR", var)
        .with_output(&[])
}

#[allow(dead_code)]
pub fn set(id: &str, var: &str, value: Block) -> Block {
    Block::new(id, "variables_set")
        .with_field("VAR", var)
        .with_value("VALUE", value)
}

#[allow(dead_code)]
pub fn arithmetic(id: &str, op: &str, a: Block, b: Block) -> Block {
    Block::new(id, "math_arithmetic")
        .with_field("OP", op)
        .with_value("A", a)
        .with_value("B", b)
        .with_output(&["Number"])
}

#[allow(dead_code)]
pub fn print(id: &str, value: Block) -> Block {
    Block::new(id, "text_print").with_value("TEXT", value)
}

/// Links `blocks` into one statement chain, first block on top.
#[allow(dead_code)]
pub fn chain(blocks: Vec<Block>) -> Block {
    let mut head: Option<Block> = None;
    for block in blocks.into_iter().rev() {
        head = Some(match head.take() {
            Some(next) => block.with_next(next),
            None => block,
        });
    }
    head.unwrap_or_else(|| Block::new("empty", "noop"))
}

/// Generates with the default configuration and unwraps the result.
#[allow(dead_code)]
pub fn generate_default(workspace: &Workspace) -> String {
    Generator::new(GeneratorConfig::default())
        .generate(workspace)
        .unwrap()
}
