//! Wraps an emitted body into a complete Java compilation unit.
use super::context::{Generation, prefix_lines};
use crate::codegen::{VARIANT_TYPE, javadoc_text, quote};
use itertools::Itertools;

/// Imports every generated class needs, whatever its blocks use.
pub const REQUIRED_IMPORTS: &[&str] = &["tsumiki.runtime.ExtensionInfo", "tsumiki.runtime.Variant"];

/// Runs the final pass over the collected fields, helpers and imports.
///
/// Must be called after the body has been emitted, since emission is what
/// populates the registries this reads.
pub(super) fn assemble(generation: &mut Generation, body: &str) -> String {
    for import in REQUIRED_IMPORTS {
        generation.add_import(import);
    }

    let fields = render_fields(generation);
    let helpers = render_helpers(generation);

    let helper_imports: Vec<String> = generation
        .helpers()
        .required_imports()
        .map(str::to_string)
        .collect();
    for import in &helper_imports {
        generation.add_import(import);
    }

    let config = generation.config();
    let indent = config.indent.as_str();
    let mut out = String::new();

    out.push_str(&render_header(generation));
    if !config.package.trim().is_empty() {
        out.push_str(&format!("package {};\n\n", config.package.trim()));
    }
    for import in generation.imports().imports(&config.extra_imports) {
        out.push_str(&format!("import {};\n", import));
    }
    out.push('\n');

    out.push_str(&render_class_metadata(generation));
    out.push_str(&render_signature(generation));
    out.push_str(&prefix_lines(&render_constructor(generation), indent));
    out.push('\n');
    out.push_str(&prefix_lines(&fields, indent));
    out.push('\n');
    out.push_str(&prefix_lines(&helpers, indent));
    out.push('\n');
    out.push_str(&prefix_lines(body, indent));
    out.push_str("}\n");

    for (name, class_body) in &config.extra_classes {
        log::debug!("Appending extra class body '{}'", name);
        out.push('\n');
        out.push_str(class_body.trim_end());
        out.push('\n');
    }

    collapse_blank_lines(&out)
}

fn render_header(generation: &Generation) -> String {
    let config = generation.config();
    let mut header = format!(
        "// Generated by tsumiki {}. Do not edit by hand.\n",
        env!("CARGO_PKG_VERSION")
    );
    for line in config.description.lines().filter(|l| !l.trim().is_empty()) {
        header.push_str(&format!("// {}\n", line.trim_end()));
    }
    header.push('\n');
    header
}

fn render_class_metadata(generation: &Generation) -> String {
    let config = generation.config();
    let mut out = String::from("/**\n");
    let description = if config.description.trim().is_empty() {
        generation.class_name()
    } else {
        config.description.as_str()
    };
    for line in description.lines() {
        out.push_str(&format!(" * {}\n", javadoc_text(line)).replace(" * \n", " *\n"));
    }
    let tags: Vec<String> = [
        ("@author", config.author.as_str()),
        ("@version", config.version.as_str()),
        ("@see", config.home_page.as_str()),
    ]
    .iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(tag, value)| format!(" * {} {}", tag, javadoc_text(value)))
    .collect();
    if !tags.is_empty() {
        out.push_str(" *\n");
        for tag in tags {
            out.push_str(&tag);
            out.push('\n');
        }
    }
    out.push_str(" */\n");

    out.push_str(&format!(
        "@ExtensionInfo(name = {}, description = {}, version = {}, versionCode = {}, \
         homePage = {}, minPlatform = {}, icon = {}, author = {})\n",
        quote(generation.class_name()),
        quote(&config.description),
        quote(&config.version),
        config.version_code,
        quote(&config.home_page),
        quote(&config.min_platform),
        quote(&config.icon),
        quote(&config.author),
    ));
    for annotation in &config.annotations {
        let annotation = annotation.trim();
        if annotation.starts_with('@') {
            out.push_str(&format!("{}\n", annotation));
        } else {
            out.push_str(&format!("@{}\n", annotation));
        }
    }
    out
}

fn render_signature(generation: &Generation) -> String {
    let config = generation.config();
    let mut signature = format!("public class {}", generation.class_name());
    if let Some(base) = config.base_class.as_deref().filter(|b| !b.trim().is_empty()) {
        signature.push_str(&format!(" extends {}", base.trim()));
    }
    let interfaces: Vec<&str> = config
        .interfaces
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .unique()
        .collect();
    if !interfaces.is_empty() {
        signature.push_str(&format!(" implements {}", interfaces.join(", ")));
    }
    signature.push_str(" {\n");
    signature
}

fn render_constructor(generation: &Generation) -> String {
    let config = generation.config();
    let indent = config.indent.as_str();
    let body = if config.base_class.as_deref().is_some_and(|b| !b.trim().is_empty()) {
        format!("{}super();\n", indent)
    } else {
        String::new()
    };
    format!("public {}() {{\n{}}}\n", generation.class_name(), body)
}

/// One `private` field per global variable, initialised by its resolved type.
fn render_fields(generation: &mut Generation) -> String {
    let globals = generation.globals().to_vec();
    let mut out = String::new();
    for var in &globals {
        let logical = generation.variable_type(&var.name).to_string();
        let java_type = generation.map_type(&logical);
        let name = generation.variable_name(&var.name);
        match var
            .initializer
            .clone()
            .or_else(|| default_initializer(generation, &logical))
        {
            Some(init) => out.push_str(&format!("private {} {} = {};\n", java_type, name, init)),
            None => out.push_str(&format!("private {} {};\n", java_type, name)),
        }
    }
    out
}

fn default_initializer(generation: &Generation, logical: &str) -> Option<String> {
    match logical {
        "Boolean" => Some("false".to_string()),
        "String" => Some(quote("")),
        VARIANT_TYPE => Some("new Variant()".to_string()),
        _ => {
            let defaults = &generation.config().default_initializers;
            let outer = logical.split(':').next().unwrap_or(logical);
            defaults
                .get(logical)
                .or_else(|| defaults.get(outer))
                .cloned()
        }
    }
}

/// Helper methods in registry order, each preceded by its generated Javadoc.
fn render_helpers(generation: &Generation) -> String {
    let indent = generation.config().indent.as_str();
    generation
        .helpers()
        .ordered()
        .iter()
        .map(|helper| format!("{}\n", helper.definition.render(&helper.name, indent)))
        .join("\n")
}

/// Collapses runs of blank lines into one and drops leading and trailing blank lines.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_blank = true;
    for line in text.lines() {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        if blank {
            out.push('\n');
        } else {
            out.push_str(line);
            out.push('\n');
        }
        previous_blank = blank;
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}
