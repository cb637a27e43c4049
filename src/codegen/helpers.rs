//! On-demand helper methods that are emitted at most once per generated class.
use super::literal::javadoc_text;
use super::names::{NameCategory, NameRegistry};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// A parameter of a helper method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperParam {
    pub name: String,
    pub ty: String,
    pub description: Option<String>,
}

/// A fully structured helper method. The emitted name is supplied at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperDefinition {
    pub summary: Option<String>,
    pub modifiers: Vec<String>,
    pub return_type: String,
    pub return_description: Option<String>,
    pub params: Vec<HelperParam>,
    pub body: Vec<String>,
    pub imports: Vec<String>,
}

impl HelperDefinition {
    /// A `private static` helper returning `return_type`.
    pub fn new(return_type: &str) -> Self {
        Self {
            summary: None,
            modifiers: vec!["private".to_string(), "static".to_string()],
            return_type: return_type.to_string(),
            return_description: None,
            params: Vec::new(),
            body: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn returns(mut self, description: &str) -> Self {
        self.return_description = Some(description.to_string());
        self
    }

    pub fn param(mut self, name: &str, ty: &str, description: &str) -> Self {
        self.params.push(HelperParam {
            name: name.to_string(),
            ty: ty.to_string(),
            description: Some(description.to_string()).filter(|d| !d.is_empty()),
        });
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.body.push(line.to_string());
        self
    }

    pub fn import(mut self, import: &str) -> Self {
        self.imports.push(import.to_string());
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }

    /// Renders the Javadoc block, or nothing when the helper carries no summary.
    pub fn render_doc(&self) -> Option<String> {
        let summary = self.summary.as_ref()?;
        let mut lines = vec!["/**".to_string()];
        lines.extend(
            summary
                .lines()
                .map(|l| format!(" * {}", javadoc_text(l)).trim_end().to_string()),
        );
        if !self.params.is_empty() || self.return_type != "void" {
            lines.push(" *".to_string());
        }
        for param in &self.params {
            let description = param.description.as_deref().unwrap_or(&param.ty);
            lines.push(format!(" * @param {} {}", param.name, javadoc_text(description)));
        }
        if self.return_type != "void" {
            let description = self
                .return_description
                .as_deref()
                .unwrap_or(&self.return_type);
            lines.push(format!(" * @return {}", javadoc_text(description)));
        }
        lines.push(" */".to_string());
        Some(lines.join("\n"))
    }

    /// Renders the full method declaration under `name`, body lines indented by `indent`.
    pub fn render(&self, name: &str, indent: &str) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .join(", ");
        let mut signature = self.modifiers.join(" ");
        if !signature.is_empty() {
            signature.push(' ');
        }
        let mut out = String::new();
        if let Some(doc) = self.render_doc() {
            out.push_str(&doc);
            out.push('\n');
        }
        out.push_str(&format!(
            "{}{} {}({}) {{\n",
            signature, self.return_type, name, params
        ));
        for line in &self.body {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("{}{}\n", indent, line));
            }
        }
        out.push('}');
        out
    }
}

/// A helper body supplied either ready-made or as a factory run on first request.
pub enum HelperBody {
    Eager(HelperDefinition),
    /// Receives the emitted method name, e.g. for recursive helpers.
    Lazy(Box<dyn FnOnce(&str) -> HelperDefinition>),
}

impl HelperBody {
    pub fn lazy<F>(factory: F) -> Self
    where
        F: FnOnce(&str) -> HelperDefinition + 'static,
    {
        HelperBody::Lazy(Box::new(factory))
    }

    fn materialize(self, name: &str) -> HelperDefinition {
        match self {
            HelperBody::Eager(definition) => definition,
            HelperBody::Lazy(factory) => factory(name),
        }
    }
}

impl fmt::Debug for HelperBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelperBody::Eager(def) => f.debug_tuple("Eager").field(def).finish(),
            HelperBody::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// A helper that has been requested during the current run.
#[derive(Debug, Clone)]
pub struct ProvidedHelper {
    pub logical_name: String,
    pub name: String,
    pub definition: HelperDefinition,
}

/// Deduplicates helper methods by logical name.
#[derive(Debug, Clone, Default)]
pub struct HelperRegistry {
    helpers: BTreeMap<String, ProvidedHelper>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.helpers.clear();
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Returns the emitted name for `logical`, recording `body` only on the first request.
    pub fn provide(
        &mut self,
        names: &mut NameRegistry,
        logical: &str,
        body: HelperBody,
    ) -> String {
        if let Some(existing) = self.helpers.get(logical) {
            return existing.name.clone();
        }
        let name = names.get_name(logical, NameCategory::Helper);
        let definition = body.materialize(&name);
        log::debug!("Providing helper '{}' as {}", logical, name);
        self.helpers.insert(
            logical.to_string(),
            ProvidedHelper {
                logical_name: logical.to_string(),
                name: name.clone(),
                definition,
            },
        );
        name
    }

    /// Static helpers first, then instance helpers, each alphabetical by logical name.
    pub fn ordered(&self) -> Vec<&ProvidedHelper> {
        let (statics, instances): (Vec<_>, Vec<_>) = self
            .helpers
            .values()
            .partition(|h| h.definition.is_static());
        statics.into_iter().chain(instances).collect()
    }

    /// Imports needed by every provided helper.
    pub fn required_imports(&self) -> impl Iterator<Item = &str> {
        self.helpers
            .values()
            .flat_map(|h| h.definition.imports.iter().map(String::as_str))
    }
}
