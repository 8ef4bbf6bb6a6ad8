//! "Next question" shortcuts shown under the chat.

/// Shown at session start and after every reset.
pub const DEFAULT_SUGGESTIONS: [&str; 3] = [
    "How do I apply to BMCC?",
    "What documents do I need?",
    "When is the deadline?",
];

/// Maximum number of suggestions kept and rendered.
pub const MAX_SUGGESTIONS: usize = 3;

/// Up to three follow-up questions, replaced wholesale after each answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionSet {
    items: Vec<String>,
}

impl Default for SuggestionSet {
    fn default() -> Self {
        Self {
            items: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SuggestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set with the model's follow-ups.
    ///
    /// Entries are trimmed and blank ones dropped, so the stored text is
    /// exactly what gets displayed and sent. A list with nothing left keeps
    /// the current suggestions. Anything beyond the first three entries is
    /// dropped. Returns whether the set changed.
    pub fn refresh(&mut self, suggestions: &[String]) -> bool {
        let items: Vec<String> = suggestions
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .take(MAX_SUGGESTIONS)
            .map(str::to_string)
            .collect();
        if items.is_empty() {
            return false;
        }
        self.items = items;
        true
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_starts_with_defaults() {
        let set = SuggestionSet::new();
        assert_eq!(set.iter().collect::<Vec<_>>(), DEFAULT_SUGGESTIONS.to_vec());
    }

    #[test]
    fn test_empty_refresh_keeps_previous() {
        let mut set = SuggestionSet::new();
        set.refresh(&owned(&["A?", "B?", "C?"]));
        assert!(!set.refresh(&[]));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["A?", "B?", "C?"]);
    }

    #[test]
    fn test_refresh_replaces_without_merging() {
        let mut set = SuggestionSet::new();
        assert!(set.refresh(&owned(&["Only one?"])));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0), Some("Only one?"));
        assert_eq!(set.get(1), None);
    }

    #[test]
    fn test_refresh_trims_and_skips_blank_entries() {
        let mut set = SuggestionSet::new();
        assert!(set.refresh(&owned(&["  What is the fee?  ", "   ", "c?", "d?"])));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["What is the fee?", "c?", "d?"]);

        assert!(!set.refresh(&owned(&["", " \t "])));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_refresh_truncates_to_three() {
        let mut set = SuggestionSet::new();
        set.refresh(&owned(&["1", "2", "3", "4", "5"]));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["1", "2", "3"]);
    }
}
