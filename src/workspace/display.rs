use super::definition::{Block, InputKind, Workspace};
use std::fmt;

/// Renders a workspace as an indented tree. Handy for checking what an editor exported.
pub struct DisplayWorkspace<'a>(pub &'a Workspace);

/// Renders one block chain as an indented tree.
pub struct DisplayBlock<'a>(pub &'a Block);

impl fmt::Display for DisplayWorkspace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for var in &self.0.variables {
            writeln!(
                f,
                "var {} : {} ({:?})",
                var.name,
                var.var_type.as_deref().unwrap_or("?"),
                var.storage
            )?;
        }
        for block in &self.0.blocks {
            write!(f, "{}", DisplayBlock(block))?;
        }
        Ok(())
    }
}

impl fmt::Display for DisplayBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current = Some(self.0);
        while let Some(block) = current {
            writeln!(f, "{}", describe(block))?;
            fmt_inputs(block, f, "")?;
            current = block.next.as_deref();
        }
        Ok(())
    }
}

fn describe(block: &Block) -> String {
    let mut fields: Vec<String> = block
        .fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    fields.sort();
    let mut line = block.block_type.clone();
    if !block.id.is_empty() {
        line.push_str(&format!(" #{}", block.id));
    }
    if !fields.is_empty() {
        line.push_str(&format!(" [{}]", fields.join(", ")));
    }
    if block.disabled {
        line.push_str(" (disabled)");
    }
    if let Some(comment) = &block.comment {
        line.push_str(&format!(" // {}", comment.replace('\n', " ")));
    }
    line
}

fn fmt_inputs(block: &Block, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
    let count = block.inputs.len();
    for (i, input) in block.inputs.iter().enumerate() {
        let is_last = i + 1 == count;
        let marker = if is_last { "└── " } else { "├── " };
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let label = match input.kind {
            InputKind::Value => input.name.clone(),
            InputKind::Statement => format!("{} {{}}", input.name),
        };

        let mut child = input.block.as_deref();
        match child {
            None => writeln!(f, "{}{}{}: <empty>", prefix, marker, label)?,
            Some(first) => {
                writeln!(f, "{}{}{}: {}", prefix, marker, label, describe(first))?;
                fmt_inputs(first, f, &child_prefix)?;
                child = first.next.as_deref();
                while let Some(next) = child {
                    writeln!(f, "{}{}", child_prefix, describe(next))?;
                    fmt_inputs(next, f, &child_prefix)?;
                    child = next.next.as_deref();
                }
            }
        }
    }
    Ok(())
}
