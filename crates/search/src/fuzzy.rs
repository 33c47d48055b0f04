//! Fuzzy matching algorithms.
//!
//! Everything here works on `char` slices so multi-byte text (Cyrillic
//! product names, mostly) is measured in characters, not bytes.

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Minimum edits needed to match `pattern` starting at each offset of `text`.
///
/// Entry `s` of the returned vector is the smallest number of insertions,
/// deletions and substitutions that turn some substring of `text` beginning
/// at character `s` into `pattern`. An exact occurrence at `s` costs 0.
///
/// This is the same answer a k-error Bitap scan gives, computed with the
/// two-row dynamic program used by [`levenshtein_distance`], run over the
/// reversed strings so that the free end of the alignment is the match start.
pub fn substring_edit_costs(text: &[char], pattern: &[char]) -> Vec<usize> {
    let n = text.len();
    let m = pattern.len();

    if m == 0 {
        return vec![0; n];
    }

    // Row 0 is all zeros: the alignment may end anywhere in the text.
    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        let p = pattern[m - i];
        curr[0] = i;
        for j in 1..=n {
            let cost = if text[n - j] == p { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let mut costs = vec![m; n];
    for j in 1..=n {
        costs[n - j] = prev[j];
    }
    costs
}

/// Check whether `text` holds `min_len` consecutive characters that all
/// occur somewhere in `pattern`.
///
/// Used to drop matches whose matched stretch is shorter than the minimum
/// match length. A `min_len` of 0 or 1 always passes.
pub fn has_alphabet_run(text: &[char], pattern: &[char], min_len: usize) -> bool {
    if min_len <= 1 {
        return true;
    }

    let mut run = 0;
    for c in text {
        if pattern.contains(c) {
            run += 1;
            if run >= min_len {
                return true;
            }
        } else {
            run = 0;
        }
    }

    false
}

/// Check if text contains all characters of query in order.
///
/// This is a simple fuzzy match that checks if all query characters
/// appear in the text in the same order (but not necessarily consecutively).
///
/// # Arguments
/// * `text` - Text to search in
/// * `query` - Query characters to find
///
/// # Returns
/// true if all query characters are found in order
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let mut text_chars = text.chars();

    for query_char in query.chars() {
        loop {
            match text_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("молоко", "молоко"), 0);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("малако", "молоко"), 2);
    }

    #[test]
    fn test_levenshtein_insert_delete() {
        assert_eq!(levenshtein_distance("сыр", "сырр"), 1);
        assert_eq!(levenshtein_distance("сырр", "сыр"), 1);
    }

    #[test]
    fn test_substring_costs_exact() {
        let costs = substring_edit_costs(&chars("свежий сыр"), &chars("сыр"));
        assert_eq!(costs.len(), 10);
        assert_eq!(costs[7], 0);
        assert_eq!(costs.iter().copied().min(), Some(0));
    }

    #[test]
    fn test_substring_costs_typo() {
        let costs = substring_edit_costs(&chars("плавленый сыр president"), &chars("сырр"));
        assert_eq!(costs.iter().copied().min(), Some(1));

        let costs = substring_edit_costs(&chars("молоко nestle"), &chars("малако"));
        assert_eq!(costs[0], 2);
    }

    #[test]
    fn test_substring_costs_past_end() {
        // Pattern hanging off the end of the text pays for the missing chars.
        let costs = substring_edit_costs(&chars("abc"), &chars("cde"));
        assert_eq!(costs[2], 2);
    }

    #[test]
    fn test_substring_costs_empty_pattern() {
        assert_eq!(substring_edit_costs(&chars("abc"), &[]), vec![0, 0, 0]);
    }

    #[test]
    fn test_alphabet_run() {
        assert!(has_alphabet_run(&chars("banana"), &chars("an"), 2));
        assert!(!has_alphabet_run(&chars("banana"), &chars("a"), 2));
        assert!(has_alphabet_run(&chars("banana"), &chars("a"), 1));
    }

    #[test]
    fn test_fuzzy_match_true() {
        assert!(fuzzy_match("hello world", "hwo"));
    }

    #[test]
    fn test_fuzzy_match_false() {
        assert!(!fuzzy_match("hello", "lhe"));
    }

    #[test]
    fn test_fuzzy_match_exact() {
        assert!(fuzzy_match("hello", "hello"));
    }
}
