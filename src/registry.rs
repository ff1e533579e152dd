//! Processor registry
//!
//! Named entries kept in priority order. Higher priority runs first; entries with equal
//! priority keep their registration order.

use crate::error::SectionizeError;

struct Entry<T> {
    name: String,
    priority: i32,
    item: T,
}

/// Registry of named, prioritized processors
///
/// # Examples
///
/// ```ignore
/// let mut registry = Registry::new();
/// registry.register(ParagraphProcessor, "paragraph", 10);
/// registry.register(EmptyBlockProcessor, "empty", 100);
///
/// assert_eq!(registry.names(), vec!["empty", "paragraph"]);
/// ```
pub struct Registry<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Registry {
            entries: Vec::new(),
        }
    }

    /// Register an item
    ///
    /// If an item with the same name already exists, it will be replaced.
    pub fn register(&mut self, item: T, name: &str, priority: i32) {
        self.entries.retain(|entry| entry.name != name);
        // Insert after every entry with priority >= ours to keep ties in registration order
        let position = self
            .entries
            .iter()
            .position(|entry| entry.priority < priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            position,
            Entry {
                name: name.to_string(),
                priority,
                item,
            },
        );
    }

    /// Remove an item by name, returning it.
    pub fn deregister(&mut self, name: &str) -> Result<T, SectionizeError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.name == name)
            .ok_or_else(|| SectionizeError::NotRegistered(name.to_string()))?;
        Ok(self.entries.remove(index).item)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.item)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn priority(&self, name: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.priority)
    }

    /// Names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Items in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.item)
    }

    /// `(name, item)` pairs in execution order.
    pub fn iter_named(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &entry.item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry: Registry<&str> = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_priority_order() {
        let mut registry = Registry::new();
        registry.register("p", "paragraph", 10);
        registry.register("e", "empty", 100);
        registry.register("h", "heading", 55);

        assert_eq!(registry.names(), vec!["empty", "heading", "paragraph"]);
        assert_eq!(registry.iter().copied().collect::<Vec<_>>(), vec!["e", "h", "p"]);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let mut registry = Registry::new();
        registry.register(1, "first", 50);
        registry.register(2, "second", 50);
        registry.register(3, "third", 50);

        assert_eq!(registry.names(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_register_replaces_existing_name() {
        let mut registry = Registry::new();
        registry.register("old", "heading", 70);
        registry.register("other", "paragraph", 10);
        registry.register("new", "heading", 5);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("heading"), Some(&"new"));
        assert_eq!(registry.priority("heading"), Some(5));
        assert_eq!(registry.names(), vec!["paragraph", "heading"]);
    }

    #[test]
    fn test_deregister() {
        let mut registry = Registry::new();
        registry.register("p", "paragraph", 10);

        assert_eq!(registry.deregister("paragraph"), Ok("p"));
        assert!(!registry.has("paragraph"));
        assert_eq!(
            registry.deregister("paragraph"),
            Err(SectionizeError::NotRegistered("paragraph".to_string()))
        );
    }
}
