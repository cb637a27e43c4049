//! Tests for block emission and class assembly.
mod common;
use common::*;
use tsumiki::prelude::*;

fn ternary(id: &str, cond: Block, then: Block, otherwise: Block) -> Block {
    Block::new(id, "logic_ternary")
        .with_value("IF", cond)
        .with_value("THEN", then)
        .with_value("ELSE", otherwise)
        .with_output(&[])
}

fn body_of(java: &str, statement: &str) -> bool {
    java.lines().any(|l| l.trim() == statement)
}

/// Emits `begin {` and wraps the rest of its chain in an indented block.
struct BeginEmitter;
impl BlockEmitter for BeginEmitter {
    fn block_type(&self) -> &str {
        "test_begin"
    }
    fn emit(&self, _block: &Block, generation: &mut Generation) -> Emitted {
        let indent = generation.indent().to_string();
        generation.stage_next(&indent, "}\n");
        Emitted::statement("begin {\n")
    }
}

/// Requests one static helper per block, named by its `NAME` field.
struct UsesHelperEmitter;
impl BlockEmitter for UsesHelperEmitter {
    fn block_type(&self) -> &str {
        "test_helper"
    }
    fn emit(&self, block: &Block, generation: &mut Generation) -> Emitted {
        let logical = block.field_text("NAME").unwrap_or_default();
        let is_static = block.field_text("STATIC").as_deref() != Some("false");
        let modifiers: &[&str] = if is_static {
            &["private", "static"]
        } else {
            &["private"]
        };
        let definition = HelperDefinition::new("void").modifiers(modifiers);
        let name = generation.provide_function(&logical, HelperBody::Eager(definition));
        Emitted::statement(format!("{}();\n", name))
    }
}

/// Registers a helper and an import, then stages modifiers for its successor.
struct NoisyEmitter;
impl BlockEmitter for NoisyEmitter {
    fn block_type(&self) -> &str {
        "test_noisy"
    }
    fn emit(&self, _block: &Block, generation: &mut Generation) -> Emitted {
        let definition = HelperDefinition::new("void").modifiers(&["private", "static"]);
        let name = generation.provide_function("noisy", HelperBody::Eager(definition));
        generation.add_import("java.util.Random");
        generation.stage_next("    ", "END\n");
        Emitted::statement(format!("{}();\n", name))
    }
}

fn local(name: &str, var_type: &str) -> VariableDecl {
    VariableDecl {
        name: name.to_string(),
        var_type: Some(var_type.to_string()),
        storage: Storage::Local,
        initializer: None,
    }
}

struct NoTypeEmitter;
impl BlockEmitter for NoTypeEmitter {
    fn block_type(&self) -> &str {
        "  "
    }
    fn emit(&self, _block: &Block, _generation: &mut Generation) -> Emitted {
        Emitted::statement("")
    }
}

#[test]
fn test_multiplication_inside_addition_is_bare() {
    let expr = arithmetic(
        "1",
        "ADD",
        get("2", "a"),
        arithmetic("3", "MULTIPLY", get("4", "b"), get("5", "c")),
    );
    let java = generate_default(&Workspace::from_block(expr));
    assert!(body_of(&java, "a + b * c;"), "{}", java);
}

#[test]
fn test_looser_children_are_parenthesised() {
    let sum_times = arithmetic(
        "1",
        "MULTIPLY",
        arithmetic("2", "ADD", get("3", "a"), get("4", "b")),
        get("5", "c"),
    );
    let with_ternary = arithmetic(
        "6",
        "ADD",
        get("7", "a"),
        ternary("8", get("9", "b"), get("10", "c"), get("11", "d")),
    );
    let right_nested = arithmetic(
        "12",
        "MINUS",
        get("13", "a"),
        arithmetic("14", "MINUS", get("15", "b"), get("16", "c")),
    );
    let left_nested = arithmetic(
        "17",
        "MINUS",
        arithmetic("18", "MINUS", get("19", "a"), get("20", "b")),
        get("21", "c"),
    );
    let workspace = Workspace {
        blocks: vec![sum_times, with_ternary, right_nested, left_nested],
        variables: vec![],
    };
    let java = generate_default(&workspace);
    assert!(body_of(&java, "(a + b) * c;"), "{}", java);
    assert!(body_of(&java, "a + (b ? c : d);"), "{}", java);
    assert!(body_of(&java, "a - (b - c);"), "{}", java);
    assert!(body_of(&java, "a - b - c;"), "{}", java);
}

#[test]
fn test_empty_value_inputs_use_defaults() {
    let expr = Block::new("1", "math_arithmetic")
        .with_field("OP", "ADD")
        .with_value("A", get("2", "x"))
        .with_output(&["Number"]);
    let java = generate_default(&Workspace::from_block(expr));
    assert!(body_of(&java, "x + 0;"), "{}", java);
}

#[test]
fn test_comments_come_first_in_subtree_order() {
    let program = print(
        "1",
        arithmetic(
            "2",
            "ADD",
            get("3", "a").with_comment("left side"),
            get("4", "b").with_comment("right side"),
        )
        .with_comment("the sum"),
    )
    .with_comment("Show the total\non two lines");
    let java = generate_default(&Workspace::from_block(program));
    assert!(
        java.contains(
            "  // Show the total\n  // on two lines\n  // the sum\n  // left side\n  // right side\n  System.out.println("
        ),
        "{}",
        java
    );
}

#[test]
fn test_empty_block_in_chain_is_skipped() {
    let program = chain(vec![
        print("a", text("a1", "A")),
        Block::new("b", "not_a_real_block"),
        print("c", text("c1", "C")),
    ]);
    let java = generate_default(&Workspace::from_block(program));
    assert!(
        java.contains("  System.out.println(\"A\");\n  System.out.println(\"C\");\n"),
        "{}",
        java
    );
}

#[test]
fn test_disabled_blocks_yield_their_successor() {
    let mut skipped = print("b", text("b1", "B"));
    skipped.disabled = true;
    let program = chain(vec![print("a", text("a1", "A")), skipped, print("c", text("c1", "C"))]);
    let java = generate_default(&Workspace::from_block(program));
    assert!(!java.contains("\"B\""));
    assert!(java.contains("System.out.println(\"C\");"));
}

#[test]
fn test_staged_indent_and_postfix_apply_once() {
    let program = chain(vec![
        Block::new("1", "test_begin"),
        print("2", text("2a", "a")),
        print("3", text("3a", "b")),
    ]);
    let generator = Generator::builder(GeneratorConfig::default())
        .with_emitter(Box::new(BeginEmitter))
        .unwrap()
        .build();
    let java = generator.generate(&Workspace::from_block(program)).unwrap();
    assert!(
        java.contains(
            "  begin {\n    System.out.println(\"a\");\n    System.out.println(\"b\");\n  }\n"
        ),
        "{}",
        java
    );
}

#[test]
fn test_staged_postfix_without_successor() {
    let generator = Generator::builder(GeneratorConfig::default())
        .with_emitter(Box::new(BeginEmitter))
        .unwrap()
        .build();
    let java = generator
        .generate(&Block::new("1", "test_begin"))
        .unwrap();
    assert!(java.contains("  begin {\n  }\n"), "{}", java);
}

#[test]
fn test_to_string_helper_is_emitted_once() {
    let prints: Vec<Block> = (0..5)
        .map(|i| print(&format!("p{}", i), get(&format!("g{}", i), "reading")))
        .collect();
    let java = generate_default(&Workspace::from_block(chain(prints)));

    assert_eq!(java.matches("System.out.println(convertToString(reading));").count(), 5);
    assert_eq!(
        java.matches("public static String convertToString(Object value) {").count(),
        1
    );
    assert!(java.contains("import java.text.DecimalFormat;"));
}

#[test]
fn test_to_string_passes_literals_through() {
    let program = chain(vec![
        print("1", text("1a", "hello")),
        print("2", number("2a", 42.0)),
        Block::new("3", "text_print"),
    ]);
    let java = generate_default(&Workspace::from_block(program));
    assert!(body_of(&java, "System.out.println(\"hello\");"), "{}", java);
    assert!(body_of(&java, "System.out.println(\"42\");"), "{}", java);
    assert!(body_of(&java, "System.out.println(\"\");"), "{}", java);
    assert!(!java.contains("convertToString"));
}

#[test]
fn test_variant_values_call_to_string() {
    let reading = Block::new("2", "sensor_read").with_output(&["Variant"]);
    let program = print("1", reading);
    let generator = Generator::builder(GeneratorConfig::default())
        .with_block_mapping("sensor_read", "variables_get")
        .build();
    let java = generator.generate(&program).unwrap();
    assert!(body_of(&java, "System.out.println(unnamed.toString());"), "{}", java);
}

#[test]
fn test_statement_in_value_slot_is_ignored() {
    let program = print("1", Block::new("2", "controls_if"));
    let java = generate_default(&Workspace::from_block(program));
    assert!(body_of(&java, "System.out.println(\"\");"), "{}", java);
    assert!(!java.contains("if ("));
}

#[test]
fn test_statement_in_value_slot_leaves_no_trace() {
    let program = chain(vec![
        print("1", Block::new("2", "test_noisy")),
        print("3", text("4", "after")),
    ]);
    let generator = Generator::builder(GeneratorConfig::default())
        .with_emitter(Box::new(NoisyEmitter))
        .unwrap()
        .build();
    let java = generator.generate(&program).unwrap();
    assert!(
        java.contains("  System.out.println(\"\");\n  System.out.println(\"after\");\n"),
        "{}",
        java
    );
    assert!(!java.contains("noisy"), "{}", java);
    assert!(!java.contains("END"), "{}", java);
    assert!(!java.contains("java.util.Random"), "{}", java);
}

#[test]
fn test_local_loop_counter_is_declared_by_the_loop() {
    let counted = Block::new("1", "controls_for")
        .with_field("VAR", "i")
        .with_value("FROM", number("2", 1.0))
        .with_value("TO", number("3", 3.0))
        .with_value("BY", number("4", 1.0))
        .with_statement("DO", print("5", get("6", "i")));
    let workspace = Workspace {
        blocks: vec![counted],
        variables: vec![local("i", "Number")],
    };
    let java = generate_default(&workspace);
    assert!(
        java.contains("  for (double i = 1; i <= 3; i += 1) {\n    System.out.println(convertToString(i));\n  }\n"),
        "{}",
        java
    );
    assert!(!java.contains("private double i"), "{}", java);
}

#[test]
fn test_global_loop_counter_is_not_redeclared() {
    let counted = Block::new("1", "controls_for")
        .with_field("VAR", "k")
        .with_value("FROM", number("2", 0.0))
        .with_value("TO", number("3", 9.0))
        .with_statement("DO", set("4", "total", get("5", "k")));
    let java = generate_default(&Workspace::from_block(counted));
    assert!(body_of(&java, "private double k = 0;"), "{}", java);
    assert!(java.contains("  for (k = 0; k <= 9; k += 1) {\n"), "{}", java);
}

#[test]
fn test_locals_are_declared_once_per_scope() {
    let branch = Block::new("1", "controls_if")
        .with_value(
            "IF0",
            Block::new("2", "logic_boolean")
                .with_field("BOOL", "TRUE")
                .with_output(&["Boolean"]),
        )
        .with_statement("DO0", set("3", "tmp", number("4", 1.0)));
    let program = chain(vec![
        branch,
        set("5", "tmp", number("6", 2.0)),
        set("7", "tmp", number("8", 3.0)),
    ]);
    let workspace = Workspace {
        blocks: vec![program],
        variables: vec![local("tmp", "Number")],
    };
    let java = generate_default(&workspace);
    assert!(
        java.contains("  if (true) {\n    double tmp = 1;\n  }\n  double tmp = 2;\n  tmp = 3;\n"),
        "{}",
        java
    );
    assert!(!java.contains("private double tmp"), "{}", java);
}

#[test]
fn test_fields_follow_resolved_types() {
    let workspace = Workspace {
        blocks: vec![chain(vec![
            set(
                "1",
                "flag",
                Block::new("2", "logic_boolean")
                    .with_field("BOOL", "TRUE")
                    .with_output(&["Boolean"]),
            ),
            set("3", "mixed", number("4", 1.0)),
            set("5", "mixed", text("6", "one")),
            set("7", "implicit", number("8", 2.5)),
        ])],
        variables: vec![
            VariableDecl::global("count", Some("Number")),
            VariableDecl::global("label", Some("Colour")),
            VariableDecl::global("items", Some("Array:Number")),
            VariableDecl::global("flag", None),
            VariableDecl::global("mystery", Some("Gadget")),
            VariableDecl::global("mixed", None),
            VariableDecl {
                name: "local".to_string(),
                var_type: Some("Number".to_string()),
                storage: Storage::Local,
                initializer: None,
            },
            VariableDecl {
                name: "start".to_string(),
                var_type: Some("Number".to_string()),
                storage: Storage::Global,
                initializer: Some("100".to_string()),
            },
        ],
    };
    let java = generate_default(&workspace);

    for field in [
        "private double count = 0;",
        "private String label = \"\";",
        "private ArrayList<Double> items = new ArrayList<>();",
        "private boolean flag = false;",
        "private Object mystery;",
        "private Object mixed;",
        "private double start = 100;",
        "private double implicit = 0;",
    ] {
        assert!(body_of(&java, field), "missing `{}` in\n{}", field, java);
    }
    assert!(!java.contains("local"));
    assert!(java.contains("import java.util.ArrayList;"));
    assert!(body_of(&java, "implicit = 2.5;"), "{}", java);
}

#[test]
fn test_loop_counter_avoids_variable_names() {
    let repeat = Block::new("1", "controls_repeat_ext")
        .with_value("TIMES", number("2", 3.0))
        .with_statement("DO", set("3", "count", number("4", 1.0)));
    let java = generate_default(&Workspace::from_block(repeat));
    assert!(
        java.contains("  for (int count2 = 0; count2 < 3; count2++) {\n    count = 1;\n  }\n"),
        "{}",
        java
    );
}

#[test]
fn test_helpers_are_ordered_static_first() {
    let program = chain(vec![
        Block::new("1", "test_helper").with_field("NAME", "zeta"),
        Block::new("2", "test_helper")
            .with_field("NAME", "alpha")
            .with_field("STATIC", "false"),
        Block::new("3", "test_helper").with_field("NAME", "beta"),
        Block::new("4", "test_helper").with_field("NAME", "zeta"),
    ]);
    let generator = Generator::builder(GeneratorConfig::default())
        .with_emitter(Box::new(UsesHelperEmitter))
        .unwrap()
        .build();
    let java = generator.generate(&program).unwrap();

    let beta = java.find("private static void beta()").unwrap();
    let zeta = java.find("private static void zeta()").unwrap();
    let alpha = java.find("private void alpha()").unwrap();
    assert!(beta < zeta && zeta < alpha, "{}", java);
    assert_eq!(java.matches("private static void zeta()").count(), 1);
    assert_eq!(java.matches("zeta();").count(), 2);
}

#[test]
fn test_helper_names_avoid_variables() {
    let program = chain(vec![
        set("1", "convertToString", number("2", 1.0)),
        print("3", get("4", "convertToString")),
    ]);
    let java = generate_default(&Workspace::from_block(program));
    assert!(body_of(&java, "convertToString = 1;"), "{}", java);
    assert!(
        body_of(&java, "System.out.println(convertToString2(convertToString));"),
        "{}",
        java
    );
}

#[test]
fn test_emitter_with_empty_type_is_rejected() {
    let result = Generator::builder(GeneratorConfig::default()).with_emitter(Box::new(NoTypeEmitter));
    assert!(matches!(result, Err(GenerateError::InvalidArgument(_))));
}

#[test]
fn test_block_mapping_reuses_builtin_emitters() {
    let generator = Generator::builder(GeneratorConfig::default())
        .with_block_mapping("my_print", "text_print")
        .with_block_mapping("broken", "does_not_exist")
        .build();
    assert!(generator.has_emitter("my_print"));
    assert!(!generator.has_emitter("broken"));

    let program = Block::new("1", "my_print").with_value("TEXT", text("2", "mapped"));
    let java = generator.generate(&program).unwrap();
    assert!(body_of(&java, "System.out.println(\"mapped\");"), "{}", java);
}

#[test]
fn test_control_flow() {
    let condition = Block::new("2", "logic_compare")
        .with_field("OP", "GT")
        .with_value("A", get("3", "speed"))
        .with_value("B", number("4", 10.0))
        .with_output(&["Boolean"]);
    let branch = Block::new("1", "controls_if")
        .with_value("IF0", condition)
        .with_statement("DO0", print("5", text("6", "fast")))
        .with_statement("ELSE", print("7", text("8", "slow")));
    let java = generate_default(&Workspace::from_block(branch));
    assert!(
        java.contains(
            "  if (speed > 10) {\n    System.out.println(\"fast\");\n  } else {\n    System.out.println(\"slow\");\n  }\n"
        ),
        "{}",
        java
    );
}

#[test]
fn test_procedures() {
    let definition = Block::new("1", "procedures_defreturn")
        .with_field("NAME", "double it")
        .with_field("PARAMS", serde_json::json!(["x"]))
        .with_value(
            "RETURN",
            arithmetic("2", "MULTIPLY", get("3", "x"), number("4", 2.0)),
        );
    let call = set(
        "5",
        "result",
        Block::new("6", "procedures_callreturn")
            .with_field("NAME", "double it")
            .with_value("ARG0", number("7", 21.0))
            .with_output(&["Number"]),
    );
    let workspace = Workspace {
        blocks: vec![definition, call],
        variables: vec![VariableDecl {
            name: "x".to_string(),
            var_type: Some("Number".to_string()),
            storage: Storage::Local,
            initializer: None,
        }],
    };
    let java = generate_default(&workspace);
    assert!(
        java.contains("  public double double_it(double x) {\n    return x * 2;\n  }\n"),
        "{}",
        java
    );
    assert!(body_of(&java, "result = double_it(21);"), "{}", java);
    assert!(body_of(&java, "private double result = 0;"), "{}", java);
}

#[test]
fn test_runs_are_independent() {
    let repeat = Block::new("1", "controls_repeat_ext")
        .with_value("TIMES", number("2", 2.0))
        .with_statement("DO", print("3", get("4", "count")));
    let workspace = Workspace::from_block(repeat);
    let generator = Generator::new(GeneratorConfig::default());
    let first = generator.generate(&workspace).unwrap();
    let second = generator.generate(&workspace).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.matches("convertToString(Object value)").count(), 1);
}

#[test]
fn test_class_wrapper() {
    let config = GeneratorConfig {
        class_name: "Weather Station".to_string(),
        description: "Reads the weather.".to_string(),
        package: "org.example.weather".to_string(),
        author: "Ada".to_string(),
        base_class: Some("Extension".to_string()),
        interfaces: vec!["Runnable".to_string(), "Runnable".to_string()],
        extra_imports: vec!["java.io.File".to_string()],
        annotations: vec!["SuppressWarnings(\"unused\")".to_string()],
        ..GeneratorConfig::default()
    };
    let generator = Generator::new(config);
    let java = generator
        .generate(&print("1", text("2", "sunny")))
        .unwrap();

    assert!(java.starts_with("// Generated by tsumiki "));
    assert!(java.contains("// Reads the weather.\n"));
    assert!(java.contains("package org.example.weather;\n"));
    assert!(java.contains(
        "import java.io.File;\nimport tsumiki.runtime.ExtensionInfo;\nimport tsumiki.runtime.Variant;\n"
    ));
    assert!(java.contains(" * @author Ada\n"));
    assert!(java.contains("@ExtensionInfo(name = \"Weather_Station\", description = \"Reads the weather.\""));
    assert!(java.contains("@SuppressWarnings(\"unused\")\n"));
    assert!(java.contains("public class Weather_Station extends Extension implements Runnable {\n"));
    assert!(java.contains("  public Weather_Station() {\n    super();\n  }\n"));
    assert!(java.ends_with("  System.out.println(\"sunny\");\n}\n"), "{}", java);
    assert!(!java.contains("\n\n\n"));
}

#[test]
fn test_description_cannot_end_the_class_javadoc() {
    let config = GeneratorConfig {
        description: "Ends */ early\nsecond line".to_string(),
        author: "A */ B".to_string(),
        ..GeneratorConfig::default()
    };
    let java = Generator::new(config)
        .generate(&print("1", text("2", "x")))
        .unwrap();
    assert!(
        java.contains(
            "/**\n * Ends *&#47; early\n * second line\n *\n * @author A *&#47; B\n * @version 1.0\n */\n@ExtensionInfo("
        ),
        "{}",
        java
    );
}

#[test]
fn test_minimal_class_exact_output() {
    let java = Generator::new(GeneratorConfig::default())
        .generate(&print("1", text("2", "Hi")))
        .unwrap();
    let expected = format!(
        "// Generated by tsumiki {}. Do not edit by hand.\n\
         \n\
         package com.example;\n\
         \n\
         import tsumiki.runtime.ExtensionInfo;\n\
         import tsumiki.runtime.Variant;\n\
         \n\
         /**\n\
         \x20* GeneratedExtension\n\
         \x20*\n\
         \x20* @version 1.0\n\
         \x20*/\n\
         @ExtensionInfo(name = \"GeneratedExtension\", description = \"\", version = \"1.0\", versionCode = 1, homePage = \"\", minPlatform = \"\", icon = \"\", author = \"\")\n\
         public class GeneratedExtension {{\n\
         \x20 public GeneratedExtension() {{\n\
         \x20 }}\n\
         \n\
         \x20 System.out.println(\"Hi\");\n\
         }}\n",
        env!("CARGO_PKG_VERSION")
    );
    assert_eq!(java, expected);
}
