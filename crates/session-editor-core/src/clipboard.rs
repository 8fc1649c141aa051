//! Per-session clipboard.
//!
//! An insertion-ordered log of copied/cut fragments. Fragments are only ever appended while
//! editing; the whole log is rebuilt at once when a session is loaded. Duplicates are kept and
//! nothing is evicted, so the log grows for the lifetime of the session.

/// Ordered log of clipboard fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    fragments: Vec<String>,
}

impl Clipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Fragment at `index` (0 = earliest).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fragments.get(index).map(String::as_str)
    }

    /// Earliest fragment.
    pub fn first(&self) -> Option<&str> {
        self.fragments.first().map(String::as_str)
    }

    /// Most recent fragment.
    pub fn last(&self) -> Option<&str> {
        self.fragments.last().map(String::as_str)
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether no fragment was ever copied.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate fragments, earliest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(String::as_str)
    }

    /// All fragments, earliest first.
    pub fn as_slice(&self) -> &[String] {
        &self.fragments
    }
}

impl<S: Into<String>> FromIterator<S> for Clipboard {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fragments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_keeps_insertion_order_and_duplicates() {
        let mut clipboard = Clipboard::new();
        assert!(clipboard.is_empty());
        assert_eq!(clipboard.last(), None);

        clipboard.push("one");
        clipboard.push("two");
        clipboard.push("one");

        assert_eq!(clipboard.len(), 3);
        assert_eq!(clipboard.first(), Some("one"));
        assert_eq!(clipboard.last(), Some("one"));
        assert_eq!(clipboard.get(1), Some("two"));
        assert_eq!(clipboard.get(3), None);
        assert_eq!(clipboard.iter().collect::<Vec<_>>(), ["one", "two", "one"]);
    }

    #[test]
    fn test_clipboard_from_iter() {
        let clipboard: Clipboard = ["a", "b\nc"].into_iter().collect();
        assert_eq!(clipboard.as_slice(), ["a".to_string(), "b\nc".to_string()]);
    }
}
