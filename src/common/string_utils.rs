//! String utility functions for common text manipulation operations.

/// Collapse every whitespace run to a single space and trim both ends
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `"1 prompt"`, `"2 prompts"`
pub fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a\t\tb\n c"), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
        assert_eq!(collapse_whitespace("single"), "single");
    }

    #[test]
    fn test_count_noun() {
        assert_eq!(count_noun(0, "skill"), "0 skills");
        assert_eq!(count_noun(1, "skill"), "1 skill");
        assert_eq!(count_noun(3, "prompt"), "3 prompts");
    }
}
