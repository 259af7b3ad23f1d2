use super::{Encoder, to_hex_pairs, wrap::fill};
use crate::{err::Result, highlight::Highlighter, model::OpKind};

pub const ROW_SIZE: usize = 16;

/// The row currently being filled.
#[derive(Debug, Default)]
struct RowState {
    addr: usize,
    /// New-side bytes consumed by this row, never more than `ROW_SIZE`.
    len: usize,
    text: String,
}

/// Renders chunks into 16-byte addressed rows like `\n000010: 00 <insert>ff</insert>`,
/// keeping only rows that carry a change.
///
/// Rows are filled by new-side bytes. A deletion has no new side, so its old
/// bytes are shown where they were removed without advancing the row.
pub struct HexdumpEncoder<H: Highlighter> {
    highlighter: H,
    width: usize,
    row: RowState,
    body: String,
    skip_space: bool,
}

impl<H: Highlighter> HexdumpEncoder<H> {
    pub fn new(highlighter: H, width: usize) -> Self {
        Self {
            highlighter,
            width,
            row: RowState::default(),
            body: String::new(),
            skip_space: true,
        }
    }

    fn add_hex_space(&mut self) {
        if self.skip_space {
            self.skip_space = false;
        } else {
            self.row.text.push(' ');
        }
    }

    /// Writes one group that fits in the current row.
    fn append_group(&mut self, old: &[u8], new: &[u8], kind: OpKind) {
        let hex = if new.is_empty() {
            to_hex_pairs(old)
        } else {
            self.add_hex_space();
            to_hex_pairs(new)
        };
        self.row
            .text
            .push_str(&self.highlighter.highlight(&hex, kind));
        if self.row.text.chars().count() > self.width {
            self.row.text = fill(&self.row.text, self.width);
        }
        self.row.len += new.len();
    }

    fn flush_row(&mut self) {
        let emitted = self.highlighter.is_marked(&self.row.text);
        if emitted {
            self.body
                .push_str(&format!("\n{:06x}:{}", self.row.addr, self.row.text));
        }
        log::trace!(
            "row {:06x}: {} bytes, emitted: {}",
            self.row.addr,
            self.row.len,
            emitted
        );
        self.row = RowState {
            addr: self.row.addr + ROW_SIZE,
            ..Default::default()
        };
    }
}

impl<H: Highlighter> Encoder for HexdumpEncoder<H> {
    fn append(&mut self, old: &[u8], new: &[u8], kind: OpKind) -> Result<()> {
        if new.is_empty() {
            self.append_group(old, new, kind);
            return Ok(());
        }
        let mut rest = new;
        while !rest.is_empty() {
            if self.row.len == ROW_SIZE {
                self.flush_row();
            }
            let take = rest.len().min(ROW_SIZE - self.row.len);
            let (group, tail) = rest.split_at(take);
            self.append_group(old, group, kind);
            rest = tail;
        }
        Ok(())
    }

    fn finish(mut self) -> String {
        self.flush_row();
        self.body
    }
}
