//! HTML escaping and newline filters

use std::borrow::Cow;

use crate::settings::NewlineMode;

const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#x27;"),
        _ => None,
    }
}

/// Escape HTML special characters, borrowing when nothing needs escaping
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(&ESCAPE_CHARS[..]) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Replace every newline with `<br>`. Input must already be escaped.
pub fn linebreaksbr(s: &str) -> String {
    normalize_newlines(s).replace('\n', "<br>")
}

/// Wrap paragraphs separated by two or more newlines in `<p>` and break
/// single newlines with `<br>`. Lines holding only whitespace are content,
/// not separators. Input must already be escaped.
pub fn linebreaks(s: &str) -> String {
    let text = normalize_newlines(s);
    if text.is_empty() {
        return String::new();
    }
    let mut paragraphs = Vec::new();
    let mut rest: &str = &text;
    while let Some(start) = rest.find("\n\n") {
        let end = rest[start..]
            .find(|c: char| c != '\n')
            .map_or(rest.len(), |offset| start + offset);
        paragraphs.push(paragraph(&rest[..start]));
        rest = &rest[end..];
    }
    paragraphs.push(paragraph(rest));
    paragraphs.join("\n\n")
}

fn paragraph(text: &str) -> String {
    format!("<p>{}</p>", text.replace('\n', "<br>"))
}

/// Escape text and apply the configured newline mode
pub fn format_text(s: &str, mode: NewlineMode) -> String {
    let escaped = escape(s);
    match mode {
        NewlineMode::Linebreaksbr => linebreaksbr(&escaped),
        NewlineMode::Linebreaks => linebreaks(&escaped),
    }
}

fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if s.contains('\r') {
        Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Tom\" & 'Jerry'</b>"), "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
        assert!(matches!(escape("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_linebreaksbr() {
        assert_eq!(linebreaksbr("a\nb\r\nc"), "a<br>b<br>c");
    }

    #[test]
    fn test_linebreaks() {
        assert_eq!(linebreaks("one\ntwo\n\nthree"), "<p>one<br>two</p>\n\n<p>three</p>");
        assert_eq!(linebreaks(""), "");
    }

    #[test]
    fn test_linebreaks_whitespace_line_is_not_a_separator() {
        assert_eq!(linebreaks("a\n \nb"), "<p>a<br> <br>b</p>");
        assert_eq!(linebreaks("a\n\n\n\nb"), "<p>a</p>\n\n<p>b</p>");
        assert_eq!(linebreaks("a\r\n\r\nb\n"), "<p>a</p>\n\n<p>b<br></p>");
    }

    #[test]
    fn test_format_text_escapes_first() {
        assert_eq!(format_text("<i>\nx", NewlineMode::Linebreaksbr), "&lt;i&gt;<br>x");
    }
}
