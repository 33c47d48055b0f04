//! Search-box suggestions.
//!
//! Suggestions are short canned queries (popular and recent searches)
//! narrowed to those containing what the user has typed so far.

use serde::{Deserialize, Serialize};

/// Relevance score levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelevanceScore {
    /// No match
    None = 0,
    /// Query characters appear in order
    Fuzzy = 10,
    /// Contains substring
    Contains = 20,
    /// A word starts with the query
    WordBoundary = 30,
    /// Starts with query
    StartsWith = 40,
    /// Exact match
    Exact = 50,
}

/// Classify how well `text` matches `query`, case-insensitively.
pub fn calculate_relevance(text: &str, query: &str) -> RelevanceScore {
    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();

    if text_lower == query_lower {
        RelevanceScore::Exact
    } else if text_lower.starts_with(&query_lower) {
        RelevanceScore::StartsWith
    } else if text_lower
        .split_whitespace()
        .any(|word| word.starts_with(&query_lower))
    {
        RelevanceScore::WordBoundary
    } else if text_lower.contains(&query_lower) {
        RelevanceScore::Contains
    } else if crate::fuzzy_match(&text_lower, &query_lower) {
        RelevanceScore::Fuzzy
    } else {
        RelevanceScore::None
    }
}

/// Suggestions shown under the search box.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuggestionList {
    pub popular: Vec<String>,
    pub recent: Vec<String>,
}

/// Source lists plus a cap for each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestions {
    pub popular: Vec<String>,
    pub recent: Vec<String>,
    /// Maximum popular entries returned
    pub popular_limit: usize,
    /// Maximum recent entries returned
    pub recent_limit: usize,
}

impl Default for Suggestions {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            popular: owned(&["молоко", "хлеб", "сыр", "фрукты", "овощи", "мясо", "кофе", "чай"]),
            recent: owned(&["сливочный сыр", "персики", "кофе nescafe"]),
            popular_limit: 4,
            recent_limit: 3,
        }
    }
}

impl Suggestions {
    /// Entries containing `query`, most relevant first, each list capped at its limit.
    ///
    /// Equally relevant entries keep their configured order. A blank query
    /// yields the head of each list.
    pub fn suggest(&self, query: &str) -> SuggestionList {
        let query = query.trim();
        SuggestionList {
            popular: rank(&self.popular, query, self.popular_limit),
            recent: rank(&self.recent, query, self.recent_limit),
        }
    }
}

fn rank(entries: &[String], query: &str, limit: usize) -> Vec<String> {
    let mut scored: Vec<(RelevanceScore, &String)> = entries
        .iter()
        .map(|entry| (calculate_relevance(entry, query), entry))
        .filter(|(score, _)| *score >= RelevanceScore::Contains)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, entry)| entry.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(calculate_relevance("Сыр", "сыр"), RelevanceScore::Exact);
    }

    #[test]
    fn test_starts_with() {
        assert_eq!(calculate_relevance("Кофе Nescafe", "кофе"), RelevanceScore::StartsWith);
    }

    #[test]
    fn test_word_boundary() {
        assert_eq!(calculate_relevance("Сливочный сыр", "сыр"), RelevanceScore::WordBoundary);
    }

    #[test]
    fn test_contains() {
        assert_eq!(calculate_relevance("сырники", "ырн"), RelevanceScore::Contains);
    }

    #[test]
    fn test_fuzzy_and_none() {
        assert_eq!(calculate_relevance("молоко", "млк"), RelevanceScore::Fuzzy);
        assert_eq!(calculate_relevance("молоко", "чай"), RelevanceScore::None);
    }

    #[test]
    fn test_blank_query_caps_lists() {
        let list = Suggestions::default().suggest("");
        assert_eq!(list.popular, vec!["молоко", "хлеб", "сыр", "фрукты"]);
        assert_eq!(list.recent.len(), 3);
    }

    #[test]
    fn test_lists_have_separate_caps() {
        let suggestions = Suggestions {
            popular: vec![
                "сыр".into(),
                "сыр моцарелла".into(),
                "сырок".into(),
                "сыр гауда".into(),
                "сырники".into(),
            ],
            recent: vec!["сыр".into(), "сырок".into(), "сыр гауда".into(), "сырники".into()],
            ..Suggestions::default()
        };
        let list = suggestions.suggest("сыр");
        assert_eq!(list.popular.len(), 4);
        assert_eq!(list.recent.len(), 3);
        assert!(!list.popular.contains(&"сырники".to_string()));
    }

    #[test]
    fn test_suggest_ranks_by_relevance() {
        let list = Suggestions::default().suggest("сыр");
        assert_eq!(list.popular, vec!["сыр"]);
        assert_eq!(list.recent, vec!["сливочный сыр"]);

        let list = Suggestions::default().suggest("КОФЕ");
        assert_eq!(list.popular, vec!["кофе"]);
        assert_eq!(list.recent, vec!["кофе nescafe"]);
    }

    #[test]
    fn test_subsequence_is_not_enough() {
        let list = Suggestions::default().suggest("млк");
        assert!(list.popular.is_empty());
    }

    #[test]
    fn test_suggest_orders_stably() {
        let suggestions = Suggestions {
            popular: vec!["чай зелёный".into(), "иван-чай".into(), "чай".into()],
            recent: vec![],
            ..Suggestions::default()
        };
        let list = suggestions.suggest("чай");
        assert_eq!(list.popular, vec!["чай", "чай зелёный", "иван-чай"]);
    }
}
