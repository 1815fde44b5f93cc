//! Insertion-ordered, tag-keyed collection.

use castle_defence_core::Tag;

/// Ordered mapping from [`Tag`] to values.
///
/// Iteration follows insertion order, which is also the draw order of a
/// layer's entities. Tags are unique; inserting under a live tag is rejected.
#[derive(Debug)]
pub struct Registry<T> {
    entries: Vec<(Tag, T)>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Registry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a value is registered under `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.position(tag).is_some()
    }

    /// Value registered under `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&T> {
        self.position(tag).map(|index| &self.entries[index].1)
    }

    /// Mutable value registered under `tag`.
    pub fn get_mut(&mut self, tag: &str) -> Option<&mut T> {
        let index = self.position(tag)?;
        Some(&mut self.entries[index].1)
    }

    /// Appends `value` under `tag`.
    ///
    /// Returns the value back when `tag` is already taken; the registered
    /// value is left untouched.
    pub fn insert(&mut self, tag: Tag, value: T) -> Result<(), T> {
        if self.contains(&tag) {
            return Err(value);
        }
        self.entries.push((tag, value));
        Ok(())
    }

    /// Removes and returns the value registered under `tag`.
    pub fn remove(&mut self, tag: &str) -> Option<T> {
        let index = self.position(tag)?;
        Some(self.entries.remove(index).1)
    }

    /// Removes every value, returning them in insertion order.
    pub fn take_all(&mut self) -> Vec<(Tag, T)> {
        std::mem::take(&mut self.entries)
    }

    /// Tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.entries.iter().map(|(tag, _)| tag)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Tag, &T)> {
        self.entries.iter().map(|(tag, value)| (tag, value))
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Mutable values in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    fn position(&self, tag: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_keeps_the_first_value() {
        let mut registry = Registry::new();
        assert!(registry.insert(Tag::new("a"), 1).is_ok());
        assert_eq!(registry.insert(Tag::new("a"), 2), Err(2));
        assert_eq!(registry.get("a"), Some(&1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removal_preserves_order_of_the_rest() {
        let mut registry = Registry::new();
        for (tag, value) in [("a", 1), ("b", 2), ("c", 3)] {
            assert!(registry.insert(Tag::new(tag), value).is_ok());
        }
        assert_eq!(registry.remove("b"), Some(2));
        assert_eq!(registry.remove("b"), None);
        let tags: Vec<&str> = registry.tags().map(|tag| tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "c"]);
    }
}
