/// Collision-free, reserved-word-safe identifiers for one generation run.
use ahash::{AHashMap, AHashSet};

/// Java keywords and literals that can never be used as identifiers.
const JAVA_RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "var", "record", "yield", "true", "false", "null",
    // Names the generated class relies on.
    "Object", "String", "System", "Math", "Variant", "ExtensionInfo",
];

/// What kind of thing a logical name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameCategory {
    Variable,
    Procedure,
    Class,
    Helper,
}

/// Maps logical names to emitted identifiers.
///
/// Issued identifiers are shared across categories, so a variable and a
/// procedure with the same logical name still get different identifiers.
#[derive(Debug, Clone)]
pub struct NameRegistry {
    reserved: AHashSet<String>,
    bindings: AHashMap<(String, NameCategory), String>,
    issued: AHashSet<String>,
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl NameRegistry {
    /// Creates a registry that also avoids `extra_reserved` on top of the Java keywords.
    pub fn new<I, S>(extra_reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reserved = JAVA_RESERVED_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(extra_reserved.into_iter().map(|w| w.as_ref().to_string()))
            .collect();
        Self {
            reserved,
            bindings: AHashMap::new(),
            issued: AHashSet::new(),
        }
    }

    /// Forgets every binding issued so far. Reserved words are kept.
    pub fn reset(&mut self) {
        self.bindings.clear();
        self.issued.clear();
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Returns the identifier bound to `(logical, category)`, creating it on first use.
    pub fn get_name(&mut self, logical: &str, category: NameCategory) -> String {
        let key = (logical.to_string(), category);
        if let Some(name) = self.bindings.get(&key) {
            return name.clone();
        }
        let name = self.get_distinct_name(logical, category);
        self.bindings.insert(key, name.clone());
        name
    }

    /// Returns a fresh identifier derived from `logical` that has never been issued.
    ///
    /// Unlike `get_name`, this does not record a binding, so calling it twice
    /// yields two different identifiers.
    pub fn get_distinct_name(&mut self, logical: &str, _category: NameCategory) -> String {
        let base = safe_name(logical);
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.reserved.contains(&candidate) || self.issued.contains(&candidate) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        self.issued.insert(candidate.clone());
        candidate
    }

    /// Looks up an existing binding without creating one.
    pub fn lookup(&self, logical: &str, category: NameCategory) -> Option<&str> {
        self.bindings
            .get(&(logical.to_string(), category))
            .map(String::as_str)
    }
}

/// Turns an arbitrary logical name into something the Java lexer accepts.
pub fn safe_name(logical: &str) -> String {
    let sanitized: String = logical
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "unnamed".to_string()
    } else if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        format!("my_{}", sanitized)
    } else {
        sanitized
    }
}
