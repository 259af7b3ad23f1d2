use crossterm::style::{Color, ResetColor, SetForegroundColor};

use crate::{config::ColorType, model::OpKind};

/// Adds visual markup to a span of rendered data according to its edit kind.
///
/// `highlight` must leave [`OpKind::Equal`] text untouched, and `is_marked`
/// reports whether a string contains markup for any of the other kinds.
pub trait Highlighter {
    fn highlight(&self, text: &str, kind: OpKind) -> String;
    fn is_marked(&self, text: &str) -> bool;
}

pub fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlHighlighter;

impl Highlighter for HtmlHighlighter {
    fn highlight(&self, text: &str, kind: OpKind) -> String {
        if kind == OpKind::Equal {
            return text.to_string();
        }
        format!("<{kind}>{}</{kind}>", html_escape(text))
    }

    fn is_marked(&self, text: &str) -> bool {
        OpKind::CHANGES
            .iter()
            .any(|kind| text.contains(&format!("<{kind}>")))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiHighlighter;

impl AnsiHighlighter {
    fn color(kind: OpKind) -> Option<Color> {
        match kind {
            OpKind::Equal => None,
            OpKind::Insert => Some(Color::Green),
            OpKind::Delete => Some(Color::Red),
            OpKind::Replace => Some(Color::Yellow),
        }
    }

    fn prefix(kind: OpKind) -> Option<String> {
        Self::color(kind).map(|color| SetForegroundColor(color).to_string())
    }
}

impl Highlighter for AnsiHighlighter {
    fn highlight(&self, text: &str, kind: OpKind) -> String {
        match Self::prefix(kind) {
            Some(prefix) => format!("{}{}{}", prefix, text, ResetColor),
            None => text.to_string(),
        }
    }

    fn is_marked(&self, text: &str) -> bool {
        OpKind::CHANGES
            .iter()
            .filter_map(|kind| Self::prefix(*kind))
            .any(|prefix| text.contains(&prefix))
    }
}

impl Highlighter for ColorType {
    fn highlight(&self, text: &str, kind: OpKind) -> String {
        match self {
            Self::Html => HtmlHighlighter.highlight(text, kind),
            Self::Ansi => AnsiHighlighter.highlight(text, kind),
        }
    }

    fn is_marked(&self, text: &str) -> bool {
        match self {
            Self::Html => HtmlHighlighter.is_marked(text),
            Self::Ansi => AnsiHighlighter.is_marked(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_equal_is_passthrough() {
        assert_eq!(HtmlHighlighter.highlight("a<b", OpKind::Equal), "a<b");
    }

    #[test]
    fn test_html_escapes_text_not_tags() {
        assert_eq!(
            HtmlHighlighter.highlight("<a & b>", OpKind::Insert),
            "<insert>&lt;a &amp; b&gt;</insert>"
        );
        assert_eq!(
            HtmlHighlighter.highlight("\"q\" 'q'", OpKind::Delete),
            "<delete>&quot;q&quot; &#x27;q&#x27;</delete>"
        );
    }

    #[test]
    fn test_html_is_marked() {
        assert!(!HtmlHighlighter.is_marked(" 00 01 02"));
        assert!(HtmlHighlighter.is_marked(" 00 <replace>ff</replace>"));
        assert!(HtmlHighlighter.is_marked("<delete>aa</delete>"));
        assert!(HtmlHighlighter.is_marked("x\n<insert>bb</insert>"));
    }

    #[test]
    fn test_ansi_wraps_with_reset() {
        for kind in OpKind::CHANGES {
            let marked = AnsiHighlighter.highlight("ab", kind);
            assert!(marked.starts_with("\x1b["), "{:?}", marked);
            assert!(marked.ends_with(&ResetColor.to_string()), "{:?}", marked);
            assert!(marked.contains("ab"));
            assert!(AnsiHighlighter.is_marked(&marked));
        }
        assert_eq!(AnsiHighlighter.highlight("ab", OpKind::Equal), "ab");
        assert!(!AnsiHighlighter.is_marked("ab"));
    }

    #[test]
    fn test_ansi_kinds_are_distinct_and_deterministic() {
        let insert = AnsiHighlighter.highlight("00", OpKind::Insert);
        let delete = AnsiHighlighter.highlight("00", OpKind::Delete);
        let replace = AnsiHighlighter.highlight("00", OpKind::Replace);
        assert_ne!(insert, delete);
        assert_ne!(delete, replace);
        assert_ne!(insert, replace);
        assert_eq!(insert, AnsiHighlighter.highlight("00", OpKind::Insert));
    }

    #[test]
    fn test_color_type_delegates() {
        assert_eq!(
            ColorType::Html.highlight("x", OpKind::Replace),
            "<replace>x</replace>"
        );
        assert_eq!(
            ColorType::Ansi.highlight("x", OpKind::Replace),
            AnsiHighlighter.highlight("x", OpKind::Replace)
        );
    }
}
