use crate::{
    config::{ColorType, DEFAULT_WIDTH, EncoderType, parse_width},
    encode::{AnyEncoder, Encoder},
    err::{RenderError, Result},
    model::{Diff, Model, ObjectData},
};

/// Renders the diffs of a [`Model`] with a fixed encoder, color and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Render {
    encoder: EncoderType,
    color: ColorType,
    width: usize,
}

impl Default for Render {
    fn default() -> Self {
        Self {
            encoder: EncoderType::default(),
            color: ColorType::default(),
            width: DEFAULT_WIDTH,
        }
    }
}

impl Render {
    pub fn new(encoder: EncoderType, color: ColorType, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(RenderError::InvalidWidth(width.to_string()));
        }
        Ok(Self {
            encoder,
            color,
            width,
        })
    }

    pub fn from_names(encoder: &str, color: &str, width: &str) -> Result<Self> {
        Self::new(encoder.parse()?, color.parse()?, parse_width(width)?)
    }

    pub fn encoder(&self) -> EncoderType {
        self.encoder
    }

    pub fn color(&self) -> ColorType {
        self.color
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn render(&self, model: &Model, diff: &Diff) -> Result<String> {
        let (old, new) = model.pair(diff)?;
        if !old.is_same_repr(new) {
            return Err(RenderError::TypeMismatch {
                target: diff.target,
            });
        }
        let mut encoder = AnyEncoder::new(self.encoder, self.color, self.width);
        log::debug!(
            "rendering diff {} ({} opcodes) as {}/{}",
            diff.target,
            diff.opcodes.len(),
            self.encoder,
            self.color
        );
        for op in &diff.opcodes {
            let old_chunk = slice(old, diff.target - 1, op.old_range())?;
            let new_chunk = slice(new, diff.target, op.new_range())?;
            encoder.append(&old_chunk, &new_chunk, op.kind)?;
        }
        Ok(encoder.finish())
    }

    pub fn dumps(&self, model: &Model) -> Result<String> {
        let mut dump = String::new();
        for diff in &model.diffs {
            dump.push_str(&self.render(model, diff)?);
            dump.push('\n');
        }
        Ok(dump)
    }
}

fn slice(data: &ObjectData, object: usize, range: std::ops::Range<usize>) -> Result<Vec<u8>> {
    data.slice(range.clone())
        .ok_or_else(|| RenderError::OpcodeOutOfRange {
            object,
            start: range.start,
            end: range.end,
            len: data.len(),
        })
}
