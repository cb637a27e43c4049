//! Logical block types and their Java representation.
//!
//! Logical types are plain tokens (`Number`, `String`, ...). Nested types are
//! written as a colon-delimited chain, outermost first: `Array:Array:Number`
//! is a list of lists of numbers.
use ahash::AHashMap;
use itertools::Itertools;

/// Fallback logical type whenever nothing more precise can be inferred.
pub const UNKNOWN_TYPE: &str = "Object";
/// The runtime's dynamic wrapper type.
pub const VARIANT_TYPE: &str = "Variant";

/// How one logical type is written in Java.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    /// Representation as a field, local or parameter type.
    pub standalone: String,
    /// Representation when nested inside a generic container (boxed form).
    pub element: String,
    /// Generic template for containers, with `{}` standing for the element type.
    pub generic: Option<String>,
    /// Import required whenever this type is written.
    pub import: Option<String>,
}

impl TypeMapping {
    pub fn simple(standalone: &str, element: &str) -> Self {
        Self {
            standalone: standalone.to_string(),
            element: element.to_string(),
            generic: None,
            import: None,
        }
    }

    pub fn container(raw: &str, generic: &str, import: &str) -> Self {
        Self {
            standalone: raw.to_string(),
            element: raw.to_string(),
            generic: Some(generic.to_string()),
            import: Some(import.to_string()),
        }
    }
}

/// The result of mapping a logical type: the Java text plus every import it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub text: String,
    pub imports: Vec<String>,
}

/// Type equivalence classes and the logical-to-Java mapping table.
#[derive(Debug, Clone)]
pub struct TypeTable {
    mappings: AHashMap<String, TypeMapping>,
    aliases: AHashMap<String, String>,
}

impl Default for TypeTable {
    fn default() -> Self {
        let mut table = Self {
            mappings: AHashMap::new(),
            aliases: AHashMap::new(),
        };
        table.insert_mapping("Number", TypeMapping::simple("double", "Double"));
        table.insert_mapping("Boolean", TypeMapping::simple("boolean", "Boolean"));
        table.insert_mapping("String", TypeMapping::simple("String", "String"));
        table.insert_mapping(VARIANT_TYPE, TypeMapping::simple("Variant", "Variant"));
        table.insert_mapping(UNKNOWN_TYPE, TypeMapping::simple("Object", "Object"));
        table.insert_mapping(
            "Array",
            TypeMapping::container("ArrayList", "ArrayList<{}>", "java.util.ArrayList"),
        );
        table.insert_mapping(
            "Map",
            TypeMapping::container("HashMap", "HashMap<String, {}>", "java.util.HashMap"),
        );

        table.insert_alias("Colour", "String");
        table.insert_alias("Color", "String");
        table.insert_alias("Integer", "Number");
        table.insert_alias("Int", "Number");
        table.insert_alias("List", "Array");
        table.insert_alias("Dictionary", "Map");
        table
    }
}

impl TypeTable {
    pub fn insert_mapping(&mut self, logical: &str, mapping: TypeMapping) {
        self.mappings.insert(logical.to_string(), mapping);
    }

    /// Declares `alias` as equivalent to `canonical` during resolution.
    pub fn insert_alias(&mut self, alias: &str, canonical: &str) {
        self.aliases.insert(alias.to_string(), canonical.to_string());
    }

    /// Maps each token of a (possibly nested) logical type to its canonical form.
    pub fn canonicalize(&self, logical: &str) -> String {
        logical
            .split(':')
            .map(|token| {
                let token = token.trim();
                self.aliases
                    .get(token)
                    .map(String::as_str)
                    .unwrap_or(token)
                    .to_string()
            })
            .join(":")
    }

    fn is_known(&self, logical: &str) -> bool {
        logical
            .split(':')
            .all(|token| self.mappings.contains_key(token))
    }

    /// Collapses the candidate types flowing into one slot into a single logical type.
    ///
    /// Empty, unknown-only or conflicting sets fall back to `Object`. An explicit
    /// `Object` candidate counts like any other type, so it conflicts with the rest.
    pub fn resolve<I, S>(&self, candidates: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: Vec<String> = candidates
            .into_iter()
            .map(|c| self.canonicalize(c.as_ref()))
            .filter(|c| self.is_known(c))
            .unique()
            .collect();

        match distinct.as_slice() {
            [single] => single.clone(),
            [] => UNKNOWN_TYPE.to_string(),
            _ => {
                log::debug!(
                    "Conflicting types {:?} resolved to {}",
                    distinct,
                    UNKNOWN_TYPE
                );
                UNKNOWN_TYPE.to_string()
            }
        }
    }

    /// Writes a logical type as Java source.
    pub fn map_type(&self, logical: &str) -> MappedType {
        let canonical = self.canonicalize(logical);
        let tokens: Vec<&str> = canonical.split(':').collect();
        let mut imports = Vec::new();
        let text = self.map_tokens(&tokens, false, &mut imports);
        MappedType { text, imports }
    }

    fn map_tokens(&self, tokens: &[&str], nested: bool, imports: &mut Vec<String>) -> String {
        let Some((outer, inner)) = tokens.split_first() else {
            return UNKNOWN_TYPE.to_string();
        };

        let Some(mapping) = self.mappings.get(*outer) else {
            log::warn!("Unknown logical type '{}', using {}", outer, UNKNOWN_TYPE);
            return UNKNOWN_TYPE.to_string();
        };

        if let Some(import) = &mapping.import {
            imports.push(import.clone());
        }

        match (&mapping.generic, inner.is_empty()) {
            (Some(template), false) => {
                let element = self.map_tokens(inner, true, imports);
                template.replace("{}", &element)
            }
            (Some(template), true) => {
                // A bare container holds anything.
                template.replace("{}", UNKNOWN_TYPE)
            }
            (None, _) => {
                if !inner.is_empty() {
                    log::warn!(
                        "Logical type '{}' is not a container, ignoring nested '{}'",
                        outer,
                        inner.join(":")
                    );
                }
                if nested {
                    mapping.element.clone()
                } else {
                    mapping.standalone.clone()
                }
            }
        }
    }
}
