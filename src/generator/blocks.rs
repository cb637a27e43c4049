//! Emitters for the core block kinds shipped with every generator.
use super::context::Generation;
use super::emitters::{BlockEmitter, Emitted, EmitterRegistry, VariableAssignment};
use crate::codegen::{NameCategory, Order};
use crate::workspace::Block;
use itertools::Itertools;

/// Inputs named `{prefix}0`, `{prefix}1`, ... in declaration order.
fn numbered_inputs(block: &Block, prefix: &str) -> Vec<String> {
    block
        .inputs
        .iter()
        .filter(|i| {
            i.name
                .strip_prefix(prefix)
                .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        })
        .map(|i| i.name.clone())
        .collect()
}

fn field_or(block: &Block, name: &str, default: &str) -> String {
    block
        .field_text(name)
        .unwrap_or_else(|| default.to_string())
}

// --- Literals ---

struct NumberEmitter;
impl BlockEmitter for NumberEmitter {
    fn block_type(&self) -> &str {
        "math_number"
    }
    fn emit(&self, block: &Block, _generation: &mut Generation) -> Emitted {
        let num = field_or(block, "NUM", "0");
        let order = if num.starts_with('-') {
            Order::Unary
        } else {
            Order::Atomic
        };
        Emitted::expression(num, order)
    }
    /// Editors leave half-typed numbers behind; anything unparsable becomes `0`.
    fn settle(&self, block: &mut Block) {
        let valid = block
            .field_text("NUM")
            .and_then(|n| n.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite());
        let text = match valid {
            Some(n) => number_literal(n),
            None => "0".to_string(),
        };
        block.fields.insert("NUM".to_string(), text.into());
    }
}

/// Writes `n` as a Java literal. Whole numbers outside the `int` range become
/// double literals in exponent form, since javac rejects oversized int literals.
fn number_literal(n: f64) -> String {
    if n.fract() != 0.0 {
        format!("{}", n)
    } else if n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX) {
        format!("{}", n as i32)
    } else {
        format!("{:e}", n)
    }
}

struct TextEmitter;
impl BlockEmitter for TextEmitter {
    fn block_type(&self) -> &str {
        "text"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        Emitted::expression(generation.quote(&field_or(block, "TEXT", "")), Order::Atomic)
    }
}

struct BooleanEmitter;
impl BlockEmitter for BooleanEmitter {
    fn block_type(&self) -> &str {
        "logic_boolean"
    }
    fn emit(&self, block: &Block, _generation: &mut Generation) -> Emitted {
        let code = if field_or(block, "BOOL", "TRUE").eq_ignore_ascii_case("false") {
            "false"
        } else {
            "true"
        };
        Emitted::expression(code, Order::Atomic)
    }
}

struct NullEmitter;
impl BlockEmitter for NullEmitter {
    fn block_type(&self) -> &str {
        "logic_null"
    }
    fn emit(&self, _block: &Block, _generation: &mut Generation) -> Emitted {
        Emitted::expression("null", Order::Atomic)
    }
}

// --- Operators ---

struct ArithmeticEmitter;
impl BlockEmitter for ArithmeticEmitter {
    fn block_type(&self) -> &str {
        "math_arithmetic"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let (operator, order) = match field_or(block, "OP", "ADD").as_str() {
            "MINUS" => (" - ", Order::Additive),
            "MULTIPLY" => (" * ", Order::Multiplicative),
            "DIVIDE" => (" / ", Order::Multiplicative),
            "POWER" => {
                let a = generation.value_to_code_or(block, "A", Order::None, "0");
                let b = generation.value_to_code_or(block, "B", Order::None, "0");
                return Emitted::expression(format!("Math.pow({}, {})", a, b), Order::Member);
            }
            _ => (" + ", Order::Additive),
        };
        let a = generation.value_to_code_or(block, "A", order, "0");
        let b = generation.value_to_code_or(block, "B", order.tighter(), "0");
        Emitted::expression(format!("{}{}{}", a, operator, b), order)
    }
}

struct CompareEmitter;
impl BlockEmitter for CompareEmitter {
    fn block_type(&self) -> &str {
        "logic_compare"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let (operator, order) = match field_or(block, "OP", "EQ").as_str() {
            "NEQ" => (" != ", Order::Equality),
            "LT" => (" < ", Order::Relational),
            "LTE" => (" <= ", Order::Relational),
            "GT" => (" > ", Order::Relational),
            "GTE" => (" >= ", Order::Relational),
            _ => (" == ", Order::Equality),
        };
        let a = generation.value_to_code_or(block, "A", order, "0");
        let b = generation.value_to_code_or(block, "B", order.tighter(), "0");
        Emitted::expression(format!("{}{}{}", a, operator, b), order)
    }
}

struct LogicOperationEmitter;
impl BlockEmitter for LogicOperationEmitter {
    fn block_type(&self) -> &str {
        "logic_operation"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let (operator, order, neutral) = match field_or(block, "OP", "AND").as_str() {
            "OR" => (" || ", Order::LogicalOr, "false"),
            _ => (" && ", Order::LogicalAnd, "true"),
        };
        let a = generation.value_to_code(block, "A", order);
        let b = generation.value_to_code(block, "B", order);
        let code = match (a.is_empty(), b.is_empty()) {
            (true, true) => return Emitted::expression("false", Order::Atomic),
            (false, true) => format!("{}{}{}", a, operator, neutral),
            (true, false) => format!("{}{}{}", neutral, operator, b),
            (false, false) => format!("{}{}{}", a, operator, b),
        };
        Emitted::expression(code, order)
    }
}

struct NegateEmitter;
impl BlockEmitter for NegateEmitter {
    fn block_type(&self) -> &str {
        "logic_negate"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let operand = generation.value_to_code_or(block, "BOOL", Order::Unary, "true");
        Emitted::expression(format!("!{}", operand), Order::Unary)
    }
}

struct TernaryEmitter;
impl BlockEmitter for TernaryEmitter {
    fn block_type(&self) -> &str {
        "logic_ternary"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let condition = generation.value_to_code_or(block, "IF", Order::Conditional.tighter(), "false");
        let then = generation.value_to_code_or(block, "THEN", Order::Conditional, "null");
        let otherwise = generation.value_to_code_or(block, "ELSE", Order::Conditional, "null");
        Emitted::expression(
            format!("{} ? {} : {}", condition, then, otherwise),
            Order::Conditional,
        )
    }
}

// --- Variables ---

struct VariableGetEmitter;
impl BlockEmitter for VariableGetEmitter {
    fn block_type(&self) -> &str {
        "variables_get"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let name = generation.variable_name(&field_or(block, "VAR", ""));
        Emitted::expression(name, Order::Atomic)
    }
}

struct VariableSetEmitter;
impl BlockEmitter for VariableSetEmitter {
    fn block_type(&self) -> &str {
        "variables_set"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let logical = field_or(block, "VAR", "");
        let name = generation.variable_name(&logical);
        let fallback = default_value(generation.variable_type(&logical));
        let value = generation.value_to_code_or(block, "VALUE", Order::Assignment, fallback);
        if generation.declare_local(&logical) {
            let java_type = generation.variable_java_type(&logical);
            return Emitted::statement(format!("{} {} = {};\n", java_type, name, value));
        }
        Emitted::statement(format!("{} = {};\n", name, value))
    }
    fn assigned_variable(&self, block: &Block) -> Option<VariableAssignment> {
        Some(VariableAssignment {
            variable: block.field_text("VAR")?,
            value_input: "VALUE".to_string(),
        })
    }
}

struct ChangeVariableEmitter;
impl BlockEmitter for ChangeVariableEmitter {
    fn block_type(&self) -> &str {
        "math_change"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let name = generation.variable_name(&field_or(block, "VAR", ""));
        let delta = generation.value_to_code_or(block, "DELTA", Order::Assignment, "1");
        Emitted::statement(format!("{} += {};\n", name, delta))
    }
}

/// A literal matching the logical type, for assignments whose value is missing.
fn default_value(logical: &str) -> &'static str {
    match logical {
        "Number" => "0",
        "Boolean" => "false",
        "String" => "\"\"",
        _ => "null",
    }
}

// --- Text ---

struct TextJoinEmitter;
impl BlockEmitter for TextJoinEmitter {
    fn block_type(&self) -> &str {
        "text_join"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let parts: Vec<String> = numbered_inputs(block, "ADD")
            .iter()
            .map(|input| generation.to_string_code(block, input))
            .collect();
        match parts.as_slice() {
            [] => Emitted::expression(generation.quote(""), Order::Atomic),
            [single] => Emitted::expression(single.clone(), Order::Member),
            _ => Emitted::expression(parts.join(" + "), Order::Additive),
        }
    }
}

struct PrintEmitter;
impl BlockEmitter for PrintEmitter {
    fn block_type(&self) -> &str {
        "text_print"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let text = generation.to_string_code(block, "TEXT");
        Emitted::statement(format!("System.out.println({});\n", text))
    }
}

// --- Lists ---

struct ListCreateEmitter;
impl BlockEmitter for ListCreateEmitter {
    fn block_type(&self) -> &str {
        "lists_create_with"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        generation.add_import("java.util.ArrayList");
        let items: Vec<String> = numbered_inputs(block, "ADD")
            .iter()
            .map(|input| generation.value_to_code_or(block, input, Order::None, "null"))
            .collect();
        if items.is_empty() {
            return Emitted::expression("new ArrayList<>()", Order::Member);
        }
        generation.add_import("java.util.Arrays");
        Emitted::expression(
            format!("new ArrayList<>(Arrays.asList({}))", items.join(", ")),
            Order::Member,
        )
    }
}

// --- Control flow ---

struct IfEmitter;
impl BlockEmitter for IfEmitter {
    fn block_type(&self) -> &str {
        "controls_if"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let mut code = String::new();
        for (n, input) in numbered_inputs(block, "IF").iter().enumerate() {
            let condition = generation.value_to_code_or(block, input, Order::None, "false");
            let branch = generation.statement_to_code(block, &format!("DO{}", &input[2..]));
            let keyword = if n == 0 { "if" } else { " else if" };
            code.push_str(&format!("{} ({}) {{\n{}}}", keyword, condition, branch));
        }
        if code.is_empty() {
            code.push_str("if (false) {\n}");
        }
        if block.input("ELSE").is_some() {
            let branch = generation.statement_to_code(block, "ELSE");
            code.push_str(&format!(" else {{\n{}}}", branch));
        }
        code.push('\n');
        Emitted::statement(code)
    }
}

struct WhileUntilEmitter;
impl BlockEmitter for WhileUntilEmitter {
    fn block_type(&self) -> &str {
        "controls_whileUntil"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let until = field_or(block, "MODE", "WHILE") == "UNTIL";
        let condition = if until {
            format!("!{}", generation.value_to_code_or(block, "BOOL", Order::Unary, "false"))
        } else {
            generation.value_to_code_or(block, "BOOL", Order::None, "false")
        };
        let body = generation.statement_to_code(block, "DO");
        Emitted::statement(format!("while ({}) {{\n{}}}\n", condition, body))
    }
}

struct RepeatEmitter;
impl BlockEmitter for RepeatEmitter {
    fn block_type(&self) -> &str {
        "controls_repeat_ext"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let times = generation.value_to_code_or(block, "TIMES", Order::Relational.tighter(), "0");
        let counter = generation.distinct_name("count", NameCategory::Variable);
        let body = generation.statement_to_code(block, "DO");
        Emitted::statement(format!(
            "for (int {c} = 0; {c} < {times}; {c}++) {{\n{body}}}\n",
            c = counter,
            times = times,
            body = body
        ))
    }
}

struct ForEmitter;
impl BlockEmitter for ForEmitter {
    fn block_type(&self) -> &str {
        "controls_for"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let logical = field_or(block, "VAR", "i");
        let var = generation.variable_name(&logical);
        let from = generation.value_to_code_or(block, "FROM", Order::Assignment, "0");
        let to = generation.value_to_code_or(block, "TO", Order::Relational.tighter(), "0");
        let by = generation.value_to_code_or(block, "BY", Order::Assignment, "1");

        // A local counter lives exactly as long as the loop.
        let declared = generation.declare_local(&logical);
        let init = if declared {
            format!("{} {}", generation.variable_java_type(&logical), var)
        } else {
            var.clone()
        };
        let body = generation.statement_to_code(block, "DO");
        if declared {
            generation.forget_local(&logical);
        }
        Emitted::statement(format!(
            "for ({init} = {from}; {v} <= {to}; {v} += {by}) {{\n{body}}}\n",
            init = init,
            v = var,
            from = from,
            to = to,
            by = by,
            body = body
        ))
    }
    fn assigned_variable(&self, block: &Block) -> Option<VariableAssignment> {
        Some(VariableAssignment {
            variable: block.field_text("VAR")?,
            value_input: "FROM".to_string(),
        })
    }
}

// --- Procedures ---

/// Parameter names stored in the `PARAMS` field as a JSON array of strings.
fn procedure_params(block: &Block) -> Vec<String> {
    block
        .fields
        .get("PARAMS")
        .and_then(|v| v.as_array())
        .map(|params| {
            params
                .iter()
                .filter_map(|p| p.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

struct ProcedureDefEmitter {
    block_type: &'static str,
}

impl BlockEmitter for ProcedureDefEmitter {
    fn block_type(&self) -> &str {
        self.block_type
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let name = generation.procedure_name(&field_or(block, "NAME", "procedure"));
        let outer = generation.enter_scope();
        let params = procedure_params(block)
            .iter()
            .map(|p| {
                generation.declare_local(p);
                let ty = generation.variable_java_type(p);
                format!("{} {}", ty, generation.variable_name(p))
            })
            .join(", ");
        let mut body = generation.statement_to_code(block, "STACK");

        let return_type = match block.input("RETURN") {
            Some(_) => {
                let value = generation.value_to_code_or(block, "RETURN", Order::None, "null");
                body.push_str(&format!("{}return {};\n", generation.indent(), value));
                let logical = generation.resolve_type(
                    block
                        .input_block("RETURN")
                        .and_then(Block::output_type)
                        .into_iter(),
                );
                generation.map_type(&logical)
            }
            None => "void".to_string(),
        };
        generation.restore_scope(outer);

        Emitted::statement(format!(
            "public {} {}({}) {{\n{}}}\n",
            return_type, name, params, body
        ))
    }
}

struct ProcedureCallEmitter {
    block_type: &'static str,
    returns: bool,
}

impl BlockEmitter for ProcedureCallEmitter {
    fn block_type(&self) -> &str {
        self.block_type
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let name = generation.procedure_name(&field_or(block, "NAME", "procedure"));
        let args = numbered_inputs(block, "ARG")
            .iter()
            .map(|input| generation.value_to_code_or(block, input, Order::None, "null"))
            .join(", ");
        let call = format!("{}({})", name, args);
        if self.returns {
            Emitted::expression(call, Order::Member)
        } else {
            Emitted::statement(format!("{};\n", call))
        }
    }
}

/// Defines the default emitters, their registration, and creation by name.
macro_rules! define_default_emitters {
    ( $( $block_type:literal => $ctor:expr ),* $(,)? ) => {
        pub(super) fn register_default_emitters(registry: &mut EmitterRegistry) {
            $( registry.insert($block_type.to_string(), Box::new($ctor)); )*
        }

        pub(super) fn create_emitter_by_name(name: &str) -> Option<Box<dyn BlockEmitter>> {
            match name {
                $( $block_type => Some(Box::new($ctor)), )*
                _ => None,
            }
        }
    };
}

define_default_emitters! {
    "math_number" => NumberEmitter,
    "text" => TextEmitter,
    "logic_boolean" => BooleanEmitter,
    "logic_null" => NullEmitter,
    "math_arithmetic" => ArithmeticEmitter,
    "logic_compare" => CompareEmitter,
    "logic_operation" => LogicOperationEmitter,
    "logic_negate" => NegateEmitter,
    "logic_ternary" => TernaryEmitter,
    "variables_get" => VariableGetEmitter,
    "variables_set" => VariableSetEmitter,
    "math_change" => ChangeVariableEmitter,
    "text_join" => TextJoinEmitter,
    "text_print" => PrintEmitter,
    "lists_create_with" => ListCreateEmitter,
    "controls_if" => IfEmitter,
    "controls_whileUntil" => WhileUntilEmitter,
    "controls_repeat_ext" => RepeatEmitter,
    "controls_for" => ForEmitter,
    "procedures_defnoreturn" => ProcedureDefEmitter { block_type: "procedures_defnoreturn" },
    "procedures_defreturn" => ProcedureDefEmitter { block_type: "procedures_defreturn" },
    "procedures_callnoreturn" => ProcedureCallEmitter { block_type: "procedures_callnoreturn", returns: false },
    "procedures_callreturn" => ProcedureCallEmitter { block_type: "procedures_callreturn", returns: true },
}
