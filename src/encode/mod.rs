pub mod hexdump;
pub mod text;
pub mod wrap;

pub use hexdump::HexdumpEncoder;
pub use text::{HexEncoder, Utf8Encoder};

use crate::{
    config::EncoderType,
    err::Result,
    highlight::Highlighter,
    model::OpKind,
};

/// Turns a stream of `(old, new, kind)` chunks into one rendered string.
///
/// Chunks must be appended in edit-operation order. `finish` consumes the
/// encoder, flushing whatever state is still pending.
pub trait Encoder {
    fn append(&mut self, old: &[u8], new: &[u8], kind: OpKind) -> Result<()>;
    fn finish(self) -> String;
}

pub(crate) fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Lowercase hex pairs separated by single spaces, e.g. `de ad be ef`.
pub(crate) fn to_hex_pairs(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| hex::encode([*byte]))
        .collect::<Vec<_>>()
        .join(" ")
}

pub enum AnyEncoder<H: Highlighter> {
    Hexdump(HexdumpEncoder<H>),
    Hex(HexEncoder<H>),
    Utf8(Utf8Encoder<H>),
}

impl<H: Highlighter> AnyEncoder<H> {
    pub fn new(encoder_type: EncoderType, highlighter: H, width: usize) -> Self {
        match encoder_type {
            EncoderType::Hexdump => Self::Hexdump(HexdumpEncoder::new(highlighter, width)),
            EncoderType::Hex => Self::Hex(HexEncoder::new(highlighter)),
            EncoderType::Utf8 => Self::Utf8(Utf8Encoder::new(highlighter)),
        }
    }
}

impl<H: Highlighter> Encoder for AnyEncoder<H> {
    fn append(&mut self, old: &[u8], new: &[u8], kind: OpKind) -> Result<()> {
        match self {
            Self::Hexdump(encoder) => encoder.append(old, new, kind),
            Self::Hex(encoder) => encoder.append(old, new, kind),
            Self::Utf8(encoder) => encoder.append(old, new, kind),
        }
    }

    fn finish(self) -> String {
        match self {
            Self::Hexdump(encoder) => encoder.finish(),
            Self::Hex(encoder) => encoder.finish(),
            Self::Utf8(encoder) => encoder.finish(),
        }
    }
}
