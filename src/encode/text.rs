use std::str;

use super::{Encoder, to_hex};
use crate::{err::Result, highlight::Highlighter, model::OpKind};

/// Renders the new side of every chunk as decoded text.
pub struct Utf8Encoder<H: Highlighter> {
    highlighter: H,
    output: String,
}

impl<H: Highlighter> Utf8Encoder<H> {
    pub fn new(highlighter: H) -> Self {
        Self {
            highlighter,
            output: String::new(),
        }
    }
}

impl<H: Highlighter> Encoder for Utf8Encoder<H> {
    fn append(&mut self, _old: &[u8], new: &[u8], kind: OpKind) -> Result<()> {
        let text = str::from_utf8(new)?;
        self.output.push_str(&self.highlighter.highlight(text, kind));
        Ok(())
    }

    fn finish(self) -> String {
        self.output
    }
}

/// Renders the new side of every chunk as unseparated lowercase hex.
pub struct HexEncoder<H: Highlighter> {
    highlighter: H,
    output: String,
}

impl<H: Highlighter> HexEncoder<H> {
    pub fn new(highlighter: H) -> Self {
        Self {
            highlighter,
            output: String::new(),
        }
    }
}

impl<H: Highlighter> Encoder for HexEncoder<H> {
    fn append(&mut self, _old: &[u8], new: &[u8], kind: OpKind) -> Result<()> {
        self.output
            .push_str(&self.highlighter.highlight(&to_hex(new), kind));
        Ok(())
    }

    fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{err::RenderError, highlight::HtmlHighlighter};

    #[test]
    fn test_hex_per_operation_appends() {
        let mut encoder = HexEncoder::new(HtmlHighlighter);
        encoder.append(b"A", b"A", OpKind::Equal).unwrap();
        encoder.append(b"B", b"B", OpKind::Equal).unwrap();
        encoder.append(b"C", b"X", OpKind::Replace).unwrap();
        encoder.append(b"D", b"D", OpKind::Equal).unwrap();
        assert_eq!(encoder.finish(), "4142<replace>58</replace>44");
    }

    #[test]
    fn test_hex_repeated_append_concatenates() {
        let once = {
            let mut encoder = HexEncoder::new(HtmlHighlighter);
            encoder.append(b"", b"\x01\x02", OpKind::Insert).unwrap();
            encoder.finish()
        };
        let mut encoder = HexEncoder::new(HtmlHighlighter);
        encoder.append(b"", b"\x01\x02", OpKind::Insert).unwrap();
        encoder.append(b"", b"\x01\x02", OpKind::Insert).unwrap();
        assert_eq!(encoder.finish(), once.repeat(2));
    }

    #[test]
    fn test_hex_deletion_renders_nothing_marked_empty() {
        let mut encoder = HexEncoder::new(HtmlHighlighter);
        encoder.append(b"\xff", b"", OpKind::Delete).unwrap();
        assert_eq!(encoder.finish(), "<delete></delete>");
    }

    #[test]
    fn test_utf8_highlights_and_escapes() {
        let mut encoder = Utf8Encoder::new(HtmlHighlighter);
        encoder.append(b"a", b"a", OpKind::Equal).unwrap();
        encoder.append(b"", "<é>".as_bytes(), OpKind::Insert).unwrap();
        assert_eq!(encoder.finish(), "a<insert>&lt;é&gt;</insert>");
    }

    #[test]
    fn test_utf8_repeated_append_concatenates() {
        let mut encoder = Utf8Encoder::new(HtmlHighlighter);
        encoder.append(b"x", b"y", OpKind::Replace).unwrap();
        encoder.append(b"x", b"y", OpKind::Replace).unwrap();
        assert_eq!(encoder.finish(), "<replace>y</replace><replace>y</replace>");
    }

    #[test]
    fn test_utf8_rejects_invalid_bytes() {
        let mut encoder = Utf8Encoder::new(HtmlHighlighter);
        let result = encoder.append(b"", &[0xff, 0xfe], OpKind::Insert);
        assert!(matches!(result, Err(RenderError::Decode(_))));
    }
}
