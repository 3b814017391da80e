//! Markup-stripping lexer.

/// Strip tag content from markup, keeping only the text between tags.
///
/// Single pass with two states: `<` enters a tag and `>` leaves it, both
/// delimiters discarded along with everything inside. There is no entity
/// decoding and no awareness of comments or quoted attribute values; a `<`
/// inside an attribute string suppresses text until the next `>`. That is a
/// documented limitation of the scan, not a defect to patch.
pub fn strip(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_interleaved_tags() {
        assert_eq!(strip("a<b>c<d>e"), "ace");
    }

    #[test]
    fn plain_text_is_untouched() {
        let text = "no tags here, just words & symbols";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn idempotent_on_balanced_input() {
        let markup = "<html><body><p>Hi there</p></body></html>";
        let once = strip(markup);
        assert_eq!(once, "Hi there");
        assert_eq!(strip(&once), once);
    }

    #[test]
    fn trailing_open_tag_swallows_the_rest() {
        // Accepted limitation of the two-state scan.
        assert_eq!(strip("visible<img src=\"x"), "visible");
    }

    #[test]
    fn newlines_survive() {
        assert_eq!(strip("<p>line one\nline two</p>"), "line one\nline two");
    }
}
