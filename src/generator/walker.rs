//! Recursive conversion of blocks into code fragments.
use super::context::{Generation, prefix_lines};
use super::emitters::Emitted;
use crate::codegen::literal::{is_numeric_literal, is_quoted_literal};
use crate::codegen::{HelperBody, HelperDefinition, Order, VARIANT_TYPE, needs_parens, quote};
use crate::workspace::Block;

/// Logical name of the runtime any-to-text helper.
pub const TO_STRING_HELPER: &str = "convertToString";

impl Generation<'_> {
    /// Generates code for a statement chain starting at `block`, successors included.
    ///
    /// Expression blocks reached here (e.g. a loose top-level value) are turned
    /// into expression statements.
    pub fn block_to_code(&mut self, block: &Block) -> String {
        if block.disabled {
            return match block.next.as_deref() {
                Some(next) => self.block_to_code(next),
                None => String::new(),
            };
        }

        let emitters = self.emitters;
        let code = match emitters.get(&block.block_type) {
            Some(emitter) => match emitter.emit(block, self) {
                Emitted::Statement(code) => code,
                Emitted::Expression(code, _) => scrub_naked_value(&code),
            },
            None => {
                log::warn!(
                    "No emitter registered for block type '{}' (block '{}'), skipping it",
                    block.block_type,
                    block.id
                );
                String::new()
            }
        };
        self.scrub(block, code)
    }

    /// Generates the expression connected to `input` of `block`, parenthesised
    /// if it binds more loosely than `order`. Unconnected inputs yield `""`.
    pub fn value_to_code(&mut self, block: &Block, input: &str, order: Order) -> String {
        let Some(child) = block.input_block(input) else {
            return String::new();
        };
        if child.disabled {
            return String::new();
        }

        let emitters = self.emitters;
        let Some(emitter) = emitters.get(&child.block_type) else {
            log::warn!(
                "No emitter registered for block type '{}' in input '{}' of '{}'",
                child.block_type,
                input,
                block.id
            );
            return String::new();
        };

        // A statement in a value slot is discarded along with whatever it registered.
        let checkpoint = (!child.is_expression()).then(|| self.checkpoint());
        let staged = (self.extra_indent.clone(), self.postfix.clone());
        match emitter.emit(child, self) {
            Emitted::Expression(code, inner) => {
                if !code.is_empty() && needs_parens(inner, order) {
                    format!("({})", code)
                } else {
                    code
                }
            }
            Emitted::Statement(_) => {
                log::warn!(
                    "Statement block '{}' ({}) is connected to value input '{}' of '{}'",
                    child.id,
                    child.block_type,
                    input,
                    block.id
                );
                if let Some(checkpoint) = checkpoint {
                    self.rollback(checkpoint);
                } else {
                    (self.extra_indent, self.postfix) = staged;
                }
                String::new()
            }
        }
    }

    /// Like `value_to_code`, falling back to `default` when the input yields nothing.
    pub fn value_to_code_or(
        &mut self,
        block: &Block,
        input: &str,
        order: Order,
        default: &str,
    ) -> String {
        let code = self.value_to_code(block, input, order);
        if code.is_empty() {
            default.to_string()
        } else {
            code
        }
    }

    /// Generates the statement chain connected to `input`, indented one level.
    pub fn statement_to_code(&mut self, block: &Block, input: &str) -> String {
        let Some(child) = block.input_block(input) else {
            return String::new();
        };
        // Locals declared inside the nested chain go out of scope with it.
        let outer = self.locals_in_scope.clone();
        let code = self.block_to_code(child);
        self.locals_in_scope = outer;
        prefix_lines(&code, &self.config.indent)
    }

    /// Generates `input` as a Java `String` expression.
    ///
    /// Quoted literals pass through, bare numbers get quoted, `Variant` values
    /// call `toString()`, and anything else goes through the shared helper.
    pub fn to_string_code(&mut self, block: &Block, input: &str) -> String {
        let is_variant = block
            .input_block(input)
            .and_then(Block::output_type)
            .is_some_and(|ty| self.type_table.canonicalize(ty) == VARIANT_TYPE);

        if is_variant {
            let code = self.value_to_code(block, input, Order::Member);
            if !code.is_empty() {
                return format!("{}.toString()", code);
            }
        }

        let code = self.value_to_code(block, input, Order::None);
        if code.is_empty() {
            return quote("");
        }
        if is_quoted_literal(&code) {
            return code;
        }
        if is_numeric_literal(&code) {
            return quote(code.trim());
        }

        let helper = self.provide_to_string_helper();
        format!("{}({})", helper, code)
    }

    fn provide_to_string_helper(&mut self) -> String {
        let indent = self.config.indent.clone();
        self.provide_function(
            TO_STRING_HELPER,
            HelperBody::lazy(move |_name| to_string_helper(&indent)),
        )
    }

    /// Prepends harvested comments and appends the successor's code.
    fn scrub(&mut self, block: &Block, code: String) -> String {
        let comments = harvest_comments(block);

        let extra_indent = std::mem::take(&mut self.extra_indent);
        let postfix = std::mem::take(&mut self.postfix);

        let mut next_code = match block.next.as_deref() {
            Some(next) => self.block_to_code(next),
            None => String::new(),
        };
        if !extra_indent.is_empty() {
            next_code = prefix_lines(&next_code, &extra_indent);
        }
        next_code.push_str(&postfix);

        format!("{}{}{}", comments, code, next_code)
    }
}

/// Turns a loose expression into a statement.
fn scrub_naked_value(code: &str) -> String {
    if code.trim().is_empty() {
        String::new()
    } else {
        format!("{};\n", code)
    }
}

/// The block's own comment followed by every comment in its value subtrees.
///
/// Statement inputs are skipped; those blocks carry their own comments when walked.
fn harvest_comments(block: &Block) -> String {
    let mut out = String::new();
    if let Some(comment) = &block.comment {
        push_comment(&mut out, comment);
    }
    for input in block.value_inputs() {
        if let Some(child) = input.block.as_deref() {
            collect_value_comments(child, &mut out);
        }
    }
    out
}

fn collect_value_comments(block: &Block, out: &mut String) {
    if let Some(comment) = &block.comment {
        push_comment(out, comment);
    }
    for input in block.value_inputs() {
        if let Some(child) = input.block.as_deref() {
            collect_value_comments(child, out);
        }
    }
}

fn push_comment(out: &mut String, comment: &str) {
    for line in comment.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str("//\n");
        } else {
            out.push_str(&format!("// {}\n", line));
        }
    }
}

fn to_string_helper(indent: &str) -> HelperDefinition {
    HelperDefinition::new("String")
        .modifiers(&["public", "static"])
        .summary("Converts any block value into text.")
        .param("value", "Object", "the value to convert")
        .returns("the text form of the value, or \"UNKNOWN\" when it has none")
        .import("java.text.DecimalFormat")
        .line("if (value instanceof String) {")
        .line(&format!("{}return (String) value;", indent))
        .line("}")
        .line("try {")
        .line(&format!(
            "{}return new DecimalFormat(\"0.#####\").format(value);",
            indent
        ))
        .line("} catch (IllegalArgumentException e) {")
        .line(&format!("{}return \"UNKNOWN\";", indent))
        .line("}")
}
