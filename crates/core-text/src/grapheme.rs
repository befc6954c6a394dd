//! Grapheme cluster helpers measured in characters.

use unicode_segmentation::UnicodeSegmentation;

/// Character length of the last extended grapheme cluster in `s` (0 when empty).
pub fn last_cluster_chars(s: &str) -> usize {
    s.graphemes(true)
        .next_back()
        .map(|g| g.chars().count())
        .unwrap_or(0)
}

/// Character length of the first extended grapheme cluster in `s` (0 when empty).
pub fn first_cluster_chars(s: &str) -> usize {
    s.graphemes(true)
        .next()
        .map(|g| g.chars().count())
        .unwrap_or(0)
}

/// Number of extended grapheme clusters in `s`.
pub fn cluster_count(s: &str) -> usize {
    s.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_clusters_are_single_chars() {
        assert_eq!(last_cluster_chars("abc"), 1);
        assert_eq!(first_cluster_chars("abc"), 1);
        assert_eq!(cluster_count("abc"), 3);
    }

    #[test]
    fn combining_mark_joins_previous_char() {
        let s = "xe\u{0301}";
        assert_eq!(last_cluster_chars(s), 2);
        assert_eq!(cluster_count(s), 2);
    }

    #[test]
    fn crlf_is_one_cluster() {
        assert_eq!(first_cluster_chars("\r\nabc"), 2);
        assert_eq!(last_cluster_chars("abc\r\n"), 2);
    }

    #[test]
    fn empty_input() {
        assert_eq!(last_cluster_chars(""), 0);
        assert_eq!(first_cluster_chars(""), 0);
    }
}
