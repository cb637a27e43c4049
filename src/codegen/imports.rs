use std::collections::BTreeSet;

/// Collects import statements requested during emission.
///
/// Backed by an ordered set, so output order never depends on request order.
#[derive(Debug, Clone, Default)]
pub struct ImportRegistry {
    imports: BTreeSet<String>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.imports.clear();
    }

    /// Records an import such as `java.util.ArrayList`. Repeated calls have no effect.
    pub fn add_import(&mut self, name: &str) {
        let name = name.trim().trim_start_matches("import ").trim_end_matches(';');
        if !name.is_empty() {
            self.imports.insert(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.imports.contains(name)
    }

    /// Returns every import, merged with `extra`, sorted and without duplicates.
    pub fn imports<I, S>(&self, extra: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut merged = self.imports.clone();
        merged.extend(
            extra
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty()),
        );
        merged.into_iter().collect()
    }
}
