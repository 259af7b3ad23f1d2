use std::{fmt, ops::Range, str::FromStr};

use similar::{Algorithm, DiffTag, capture_diff_slices};

use crate::err::{RenderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl OpKind {
    pub const CHANGES: [OpKind; 3] = [OpKind::Insert, OpKind::Delete, OpKind::Replace];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::Replace => "replace",
        }
    }
}

impl FromStr for OpKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "equal" => Ok(Self::Equal),
            "insert" => Ok(Self::Insert),
            "delete" => Ok(Self::Delete),
            "replace" => Ok(Self::Replace),
            _ => Err(RenderError::UnknownOpKind(s.to_string())),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DiffTag> for OpKind {
    fn from(tag: DiffTag) -> Self {
        match tag {
            DiffTag::Equal => Self::Equal,
            DiffTag::Insert => Self::Insert,
            DiffTag::Delete => Self::Delete,
            DiffTag::Replace => Self::Replace,
        }
    }
}

/// One span of an alignment: `old[start1..end1]` became `new[start2..end2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub kind: OpKind,
    pub start1: usize,
    pub end1: usize,
    pub start2: usize,
    pub end2: usize,
}

impl Opcode {
    pub fn new(kind: OpKind, start1: usize, end1: usize, start2: usize, end2: usize) -> Self {
        Self {
            kind,
            start1,
            end1,
            start2,
            end2,
        }
    }

    pub fn old_range(&self) -> Range<usize> {
        self.start1..self.end1
    }

    pub fn new_range(&self) -> Range<usize> {
        self.start2..self.end2
    }
}

impl TryFrom<(&str, usize, usize, usize, usize)> for Opcode {
    type Error = RenderError;

    fn try_from(
        (kind, start1, end1, start2, end2): (&str, usize, usize, usize, usize),
    ) -> Result<Self> {
        Ok(Self::new(kind.parse()?, start1, end1, start2, end2))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectData {
    Bytes(Vec<u8>),
    Text(String),
}

impl ObjectData {
    pub fn is_same_repr(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Bytes(_), Self::Bytes(_)) | (Self::Text(_), Self::Text(_))
        )
    }

    /// Length in the unit opcodes index with: bytes, or chars for text.
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.len(),
            Self::Text(text) => text.chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cuts `range` out of the data as UTF-8 bytes. Text is indexed by char.
    pub fn slice(&self, range: Range<usize>) -> Option<Vec<u8>> {
        if range.start > range.end {
            return None;
        }
        match self {
            Self::Bytes(bytes) => bytes.get(range).map(<[u8]>::to_vec),
            Self::Text(text) => {
                let mut indices = text
                    .char_indices()
                    .map(|(i, _)| i)
                    .chain(std::iter::once(text.len()));
                let start = indices.nth(range.start)?;
                let end = if range.end == range.start {
                    start
                } else {
                    indices.nth(range.end - range.start - 1)?
                };
                Some(text.as_bytes()[start..end].to_vec())
            }
        }
    }
}

impl From<Vec<u8>> for ObjectData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for ObjectData {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<String> for ObjectData {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ObjectData {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub data: ObjectData,
}

/// Edit operations turning `objects[target - 1]` into `objects[target]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub target: usize,
    pub opcodes: Vec<Opcode>,
}

impl Diff {
    pub fn from_compare(target: usize, old: &ObjectData, new: &ObjectData) -> Result<Self> {
        let ops = match (old, new) {
            (ObjectData::Bytes(old), ObjectData::Bytes(new)) => {
                capture_diff_slices(Algorithm::Myers, old, new)
            }
            (ObjectData::Text(old), ObjectData::Text(new)) => {
                let old: Vec<char> = old.chars().collect();
                let new: Vec<char> = new.chars().collect();
                capture_diff_slices(Algorithm::Myers, &old, &new)
            }
            _ => return Err(RenderError::TypeMismatch { target }),
        };
        let opcodes = ops
            .iter()
            .map(|op| {
                let (tag, old_range, new_range) = op.as_tag_tuple();
                Opcode::new(
                    tag.into(),
                    old_range.start,
                    old_range.end,
                    new_range.start,
                    new_range.end,
                )
            })
            .collect();
        Ok(Self { target, opcodes })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub objects: Vec<Object>,
    pub diffs: Vec<Diff>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object, diffing it against the previous one if any.
    pub fn push(&mut self, data: impl Into<ObjectData>) -> Result<()> {
        let data = data.into();
        if let Some(prev) = self.objects.last() {
            let target = self.objects.len();
            if !prev.data.is_same_repr(&data) {
                return Err(RenderError::TypeMismatch { target });
            }
            let diff = Diff::from_compare(target, &prev.data, &data)?;
            log::debug!(
                "diffed object {} against {}: {} opcodes",
                target,
                target - 1,
                diff.opcodes.len()
            );
            self.diffs.push(diff);
        }
        self.objects.push(Object { data });
        Ok(())
    }

    /// Resolves the `(old, new)` pair a diff refers to.
    pub fn pair(&self, diff: &Diff) -> Result<(&ObjectData, &ObjectData)> {
        let out_of_range = || RenderError::TargetOutOfRange {
            target: diff.target,
            objects: self.objects.len(),
        };
        let old_idx = diff.target.checked_sub(1).ok_or_else(out_of_range)?;
        let old = self.objects.get(old_idx).ok_or_else(out_of_range)?;
        let new = self.objects.get(diff.target).ok_or_else(out_of_range)?;
        Ok((&old.data, &new.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_kind_parse() {
        assert_eq!("replace".parse::<OpKind>().unwrap(), OpKind::Replace);
        assert_eq!(OpKind::Insert.to_string(), "insert");
        assert!(matches!(
            "Equal".parse::<OpKind>(),
            Err(RenderError::UnknownOpKind(_))
        ));
    }

    #[test]
    fn test_opcode_from_tuple() {
        let op = Opcode::try_from(("delete", 0, 3, 0, 0)).unwrap();
        assert_eq!(op, Opcode::new(OpKind::Delete, 0, 3, 0, 0));
        assert!(Opcode::try_from(("swap", 0, 1, 0, 1)).is_err());
    }

    #[test]
    fn test_slice_text_by_char() {
        let data = ObjectData::from("aé€b");
        assert_eq!(data.len(), 4);
        assert_eq!(data.slice(1..3).unwrap(), "é€".as_bytes());
        assert_eq!(data.slice(4..4).unwrap(), b"");
        assert_eq!(data.slice(0..4).unwrap(), "aé€b".as_bytes());
        assert!(data.slice(3..5).is_none());
        assert!(data.slice(2..1).is_none());
    }

    #[test]
    fn test_slice_bytes() {
        let data = ObjectData::from(&b"ABCD"[..]);
        assert_eq!(data.slice(1..3).unwrap(), b"BC");
        assert!(data.slice(2..5).is_none());
    }

    #[test]
    fn test_push_records_diffs() {
        let mut model = Model::new();
        model.push(b"ABCD".to_vec()).unwrap();
        assert!(model.diffs.is_empty());
        model.push(b"ABXD".to_vec()).unwrap();
        assert_eq!(model.diffs.len(), 1);
        let diff = &model.diffs[0];
        assert_eq!(diff.target, 1);
        assert_eq!(
            diff.opcodes,
            vec![
                Opcode::new(OpKind::Equal, 0, 2, 0, 2),
                Opcode::new(OpKind::Replace, 2, 3, 2, 3),
                Opcode::new(OpKind::Equal, 3, 4, 3, 4),
            ]
        );
    }

    #[test]
    fn test_push_rejects_mixed_representations() {
        let mut model = Model::new();
        model.push("text").unwrap();
        assert!(matches!(
            model.push(b"bytes".to_vec()),
            Err(RenderError::TypeMismatch { target: 1 })
        ));
        assert_eq!(model.objects.len(), 1);
    }

    #[test]
    fn test_pair_out_of_range() {
        let mut model = Model::new();
        model.push(b"a".to_vec()).unwrap();
        model.push(b"b".to_vec()).unwrap();
        let zero = Diff {
            target: 0,
            opcodes: vec![],
        };
        let past_end = Diff {
            target: 2,
            opcodes: vec![],
        };
        assert!(matches!(
            model.pair(&zero),
            Err(RenderError::TargetOutOfRange { target: 0, .. })
        ));
        assert!(matches!(
            model.pair(&past_end),
            Err(RenderError::TargetOutOfRange { target: 2, objects: 2 })
        ));
        assert!(model.pair(&model.diffs[0]).is_ok());
    }
}
