use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

/// Per-run settings supplied by the embedding editor. The generator never persists these.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    #[serde(alias = "className")]
    pub class_name: String,
    pub description: String,
    pub version: String,
    #[serde(alias = "versionCode")]
    pub version_code: u32,
    #[serde(alias = "homePage")]
    pub home_page: String,
    #[serde(alias = "minPlatform")]
    pub min_platform: String,
    pub icon: String,
    pub author: String,
    pub package: String,
    #[serde(alias = "baseClass")]
    pub base_class: Option<String>,
    pub interfaces: Vec<String>,
    #[serde(alias = "extraImports")]
    pub extra_imports: Vec<String>,
    /// Additional top-level classes appended verbatim after the generated one, keyed by name.
    #[serde(alias = "extraClasses")]
    pub extra_classes: BTreeMap<String, String>,
    /// Field initialiser per logical type, used when a variable has no explicit initialiser.
    #[serde(alias = "defaultInitializers")]
    pub default_initializers: BTreeMap<String, String>,
    /// Annotations placed on the generated class in addition to `@ExtensionInfo`.
    pub annotations: Vec<String>,
    #[serde(alias = "extraReservedWords")]
    pub extra_reserved_words: Vec<String>,
    pub indent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let mut default_initializers = BTreeMap::new();
        default_initializers.insert("Number".to_string(), "0".to_string());
        default_initializers.insert("Array".to_string(), "new ArrayList<>()".to_string());
        default_initializers.insert("Map".to_string(), "new HashMap<>()".to_string());

        Self {
            class_name: "GeneratedExtension".to_string(),
            description: String::new(),
            version: "1.0".to_string(),
            version_code: 1,
            home_page: String::new(),
            min_platform: String::new(),
            icon: String::new(),
            author: String::new(),
            package: "com.example".to_string(),
            base_class: None,
            interfaces: Vec::new(),
            extra_imports: Vec::new(),
            extra_classes: BTreeMap::new(),
            default_initializers,
            annotations: Vec::new(),
            extra_reserved_words: Vec::new(),
            indent: "  ".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load a config from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
