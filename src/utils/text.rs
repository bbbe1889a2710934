//! Text cleaning helpers shared by the extractors.

use scraper::Html;
use unicode_segmentation::UnicodeSegmentation;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip markup from an HTML fragment, keeping one line per text block.
pub fn html_to_text(html: &str) -> String {
    if !html.contains(['<', '&']) {
        return normalize_whitespace(html);
    }
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate to at most `max` user-perceived characters.
pub fn truncate_graphemes(s: &str, max: usize) -> String {
    s.graphemes(true).take(max).collect()
}

/// Number of user-perceived characters.
pub fn grapheme_len(s: &str) -> usize {
    s.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Lab \n\t moved  "), "Lab moved");
        assert_eq!(normalize_whitespace(" \n "), "");
    }

    #[test]
    fn test_html_to_text_blocks() {
        let text = html_to_text("<p>Hello   <b>class</b></p><p>See you &amp; bye</p>");
        assert_eq!(text, "Hello\nclass\nSee you & bye");
    }

    #[test]
    fn test_html_to_text_plain() {
        assert_eq!(html_to_text("  plain   text "), "plain text");
    }

    #[test]
    fn test_html_to_text_decodes_entities_without_tags() {
        assert_eq!(html_to_text("Quiz &amp; Lab exam moved"), "Quiz & Lab exam moved");
        assert_eq!(html_to_text("Room&nbsp;12 &lt;B&gt;"), "Room 12 <B>");
    }

    #[test]
    fn test_truncate_graphemes_keeps_clusters() {
        let s = "e\u{301}cole";
        assert_eq!(truncate_graphemes(s, 1), "e\u{301}");
        assert_eq!(grapheme_len(s), 5);
        assert_eq!(truncate_graphemes("abc", 10), "abc");
    }
}
