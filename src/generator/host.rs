//! Generator hosts: where generated units go.

use std::collections::BTreeMap;

/// Receiver of generated source text, keyed by hint name.
pub trait GeneratorHost {
    /// Register a source. Registering a hint name twice replaces the earlier text.
    fn add_source(&mut self, hint_name: &str, text: &str);
}

/// In-memory host, ordered by hint name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOutput {
    sources: BTreeMap<String, String>,
}

impl SourceOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hint_name: &str) -> Option<&str> {
        self.sources.get(hint_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn hint_names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sources.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.sources
    }
}

impl GeneratorHost for SourceOutput {
    fn add_source(&mut self, hint_name: &str, text: &str) {
        self.sources.insert(hint_name.to_string(), text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut output = SourceOutput::new();
        output.add_source("B.generated", "first");
        output.add_source("A.generated", "a");
        output.add_source("B.generated", "second");
        assert_eq!(output.len(), 2);
        assert_eq!(output.get("B.generated"), Some("second"));
        assert_eq!(output.hint_names().collect::<Vec<_>>(), vec!["A.generated", "B.generated"]);
    }
}
