use super::emitters::EmitterRegistry;
use crate::codegen::{
    HelperBody, HelperRegistry, ImportRegistry, NameCategory, NameRegistry, TypeTable,
    UNKNOWN_TYPE, quote,
};
use crate::config::GeneratorConfig;
use crate::workspace::{Storage, VariableDecl, Workspace};
use ahash::{AHashMap, AHashSet};

/// All mutable state of one generation run.
///
/// A fresh `Generation` is created for every run and dropped when the run
/// finishes, so names, imports, helpers and inferred types never leak between
/// runs.
pub struct Generation<'a> {
    pub(super) config: &'a GeneratorConfig,
    pub(super) emitters: &'a EmitterRegistry,
    pub(super) type_table: &'a TypeTable,
    names: NameRegistry,
    imports: ImportRegistry,
    helpers: HelperRegistry,
    variable_types: AHashMap<String, String>,
    globals: Vec<VariableDecl>,
    pub(super) locals_in_scope: AHashSet<String>,
    class_name: String,
    pub(super) extra_indent: String,
    pub(super) postfix: String,
}

impl<'a> Generation<'a> {
    pub(super) fn new(
        config: &'a GeneratorConfig,
        emitters: &'a EmitterRegistry,
        type_table: &'a TypeTable,
    ) -> Self {
        let mut names = NameRegistry::new(&config.extra_reserved_words);
        let class_name = names.get_name(&config.class_name, NameCategory::Class);
        Self {
            config,
            emitters,
            type_table,
            names,
            imports: ImportRegistry::new(),
            helpers: HelperRegistry::new(),
            variable_types: AHashMap::new(),
            globals: Vec::new(),
            locals_in_scope: AHashSet::new(),
            class_name,
            extra_indent: String::new(),
            postfix: String::new(),
        }
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// The configured indentation unit.
    pub fn indent(&self) -> &str {
        &self.config.indent
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Resolves every variable's type and reserves its identifier.
    ///
    /// Candidates are the declared type plus the single output type of every
    /// value block assigned to the variable. Runs once, before emission.
    pub(super) fn init_variables(&mut self, workspace: &Workspace) {
        let mut candidates: AHashMap<String, Vec<String>> = AHashMap::new();
        let mut order: Vec<String> = Vec::new();

        for var in &workspace.variables {
            if !candidates.contains_key(&var.name) {
                order.push(var.name.clone());
            }
            let entry = candidates.entry(var.name.clone()).or_default();
            entry.extend(var.var_type.iter().cloned());
        }

        let mut implicit: Vec<String> = Vec::new();
        for block in workspace.all_blocks() {
            let Some(emitter) = self.emitters.get(&block.block_type) else {
                continue;
            };
            let Some(assignment) = emitter.assigned_variable(block) else {
                continue;
            };
            if !candidates.contains_key(&assignment.variable) {
                implicit.push(assignment.variable.clone());
            }
            let entry = candidates.entry(assignment.variable).or_default();
            if let Some(ty) = block
                .input_block(&assignment.value_input)
                .and_then(|b| b.output_type())
            {
                entry.push(ty.to_string());
            }
        }
        implicit.sort();
        implicit.dedup();

        for name in order.iter().chain(implicit.iter()) {
            let resolved = self
                .type_table
                .resolve(candidates.get(name).into_iter().flatten());
            log::debug!("Variable '{}' resolved to type {}", name, resolved);
            self.variable_types.insert(name.clone(), resolved);
            self.names.get_name(name, NameCategory::Variable);
        }

        self.globals = workspace
            .variables
            .iter()
            .filter(|v| v.storage == Storage::Global)
            .cloned()
            .collect();
        for name in implicit {
            log::debug!("Variable '{}' is assigned but never declared", name);
            self.globals.push(VariableDecl::global(&name, None));
        }
    }

    /// Global variables that become fields of the generated class.
    pub fn globals(&self) -> &[VariableDecl] {
        &self.globals
    }

    /// True if `name` is rendered as a field of the generated class.
    pub fn is_global(&self, name: &str) -> bool {
        self.globals.iter().any(|v| v.name == name)
    }

    /// Marks a non-global variable as declared in the current Java scope.
    ///
    /// Returns `true` if the caller must write the declaration, i.e. the
    /// variable is neither a field nor already declared.
    pub fn declare_local(&mut self, name: &str) -> bool {
        !self.is_global(name) && self.locals_in_scope.insert(name.to_string())
    }

    /// Ends the scope of a local declared with `declare_local`.
    pub fn forget_local(&mut self, name: &str) {
        self.locals_in_scope.remove(name);
    }

    /// Starts a fresh method scope, returning the enclosing one for `restore_scope`.
    pub fn enter_scope(&mut self) -> AHashSet<String> {
        std::mem::take(&mut self.locals_in_scope)
    }

    pub fn restore_scope(&mut self, outer: AHashSet<String>) {
        self.locals_in_scope = outer;
    }

    /// The resolved logical type of a variable, `Object` when it is unknown.
    pub fn variable_type(&self, name: &str) -> &str {
        self.variable_types
            .get(name)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_TYPE)
    }

    /// The Java type of a variable, registering any imports it needs.
    pub fn variable_java_type(&mut self, name: &str) -> String {
        let logical = self.variable_type(name).to_string();
        self.map_type(&logical)
    }

    pub fn variable_name(&mut self, logical: &str) -> String {
        self.names.get_name(logical, NameCategory::Variable)
    }

    pub fn procedure_name(&mut self, logical: &str) -> String {
        self.names.get_name(logical, NameCategory::Procedure)
    }

    /// A fresh identifier, e.g. for loop counters.
    pub fn distinct_name(&mut self, logical: &str, category: NameCategory) -> String {
        self.names.get_distinct_name(logical, category)
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    pub fn add_import(&mut self, name: &str) {
        self.imports.add_import(name);
    }

    pub fn imports(&self) -> &ImportRegistry {
        &self.imports
    }

    /// Returns the emitted name of helper `logical`, recording its body on first use only.
    pub fn provide_function(&mut self, logical: &str, body: HelperBody) -> String {
        self.helpers.provide(&mut self.names, logical, body)
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    /// Collapses candidate logical types into one.
    pub fn resolve_type<I, S>(&self, candidates: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.type_table.resolve(candidates)
    }

    /// Canonical form of a logical type, e.g. `Colour` becomes `String`.
    pub fn canonical_type(&self, logical: &str) -> String {
        self.type_table.canonicalize(logical)
    }

    /// Writes a logical type as Java, registering any imports it needs.
    pub fn map_type(&mut self, logical: &str) -> String {
        let mapped = self.type_table.map_type(logical);
        for import in &mapped.imports {
            self.imports.add_import(import);
        }
        mapped.text
    }

    pub fn quote(&self, text: &str) -> String {
        quote(text)
    }

    /// Stages an indent and a suffix for the successor of the block currently being emitted.
    ///
    /// Both are consumed by exactly one successor step and then reset. Call this
    /// after emitting any nested statements, which would otherwise consume them.
    pub fn stage_next(&mut self, extra_indent: &str, postfix: &str) {
        self.extra_indent = extra_indent.to_string();
        self.postfix = postfix.to_string();
    }
}

/// Everything emitting a block can leave behind, captured so that a discarded
/// emission can be undone.
pub(super) struct Checkpoint {
    names: NameRegistry,
    imports: ImportRegistry,
    helpers: HelperRegistry,
    locals_in_scope: AHashSet<String>,
    extra_indent: String,
    postfix: String,
}

impl Generation<'_> {
    pub(super) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            names: self.names.clone(),
            imports: self.imports.clone(),
            helpers: self.helpers.clone(),
            locals_in_scope: self.locals_in_scope.clone(),
            extra_indent: self.extra_indent.clone(),
            postfix: self.postfix.clone(),
        }
    }

    pub(super) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.names = checkpoint.names;
        self.imports = checkpoint.imports;
        self.helpers = checkpoint.helpers;
        self.locals_in_scope = checkpoint.locals_in_scope;
        self.extra_indent = checkpoint.extra_indent;
        self.postfix = checkpoint.postfix;
    }
}

/// Prefixes every non-empty line of `text` with `prefix`.
pub fn prefix_lines(text: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_lines_skips_blank_lines() {
        assert_eq!(prefix_lines("a;\n\nb;\n", "  "), "  a;\n\n  b;\n");
        assert_eq!(prefix_lines("x", "\t"), "\tx");
        assert_eq!(prefix_lines("x\n", ""), "x\n");
    }
}
