use std::str::Utf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown encoder: {0} (expected one of hexdump, hex, utf8)")]
    UnknownEncoder(String),
    #[error("unknown color: {0} (expected one of html, ansi)")]
    UnknownColor(String),
    #[error("invalid width: {0:?} (expected a positive integer)")]
    InvalidWidth(String),
    #[error("unknown opcode kind: {0}")]
    UnknownOpKind(String),
    #[error("diff target {target} is out of range for a model with {objects} objects")]
    TargetOutOfRange { target: usize, objects: usize },
    #[error("opcode range {start}..{end} is out of range for object {object} of length {len}")]
    OpcodeOutOfRange {
        object: usize,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("cannot decode chunk as utf8: {0}")]
    Decode(#[from] Utf8Error),
    #[error("objects {} and {target} hold different data representations", .target.saturating_sub(1))]
    TypeMismatch { target: usize },
}

pub type Result<T> = std::result::Result<T, RenderError>;
