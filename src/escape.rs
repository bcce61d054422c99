/// Neutralize markup-significant characters in field values before they
/// reach the screen. The source files are plain text under nobody's
/// control, so every displayed value goes through this transform.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tag_is_inert() {
        assert_eq!(
            escape_markup("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(escape_markup("debian-12.4.0-amd64"), "debian-12.4.0-amd64");
    }

    #[test]
    fn ampersand_first() {
        // '&' must not double-escape the entities produced for the others
        assert_eq!(escape_markup("a&\"'b"), "a&amp;&quot;&#39;b");
    }
}
