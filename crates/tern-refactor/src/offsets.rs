use tern_core::{TextRange, TextSize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OffsetError {
    #[error("offset {offset:?} is past the end of the document (len={len:?})")]
    OutOfBounds { offset: TextSize, len: TextSize },
    #[error("offset {offset:?} is not a UTF-8 character boundary")]
    NotCharBoundary { offset: TextSize },
}

/// Maps positions of the syntax tree onto byte offsets of the buffer being edited.
pub trait OffsetTranslator {
    fn offset(&self, pos: TextSize) -> Result<TextSize, OffsetError>;

    fn range(&self, range: TextRange) -> Result<TextRange, OffsetError> {
        Ok(TextRange::new(
            self.offset(range.start())?,
            self.offset(range.end())?,
        ))
    }
}

/// Translator for a tree parsed from the buffer itself, where positions already are byte
/// offsets. It only checks that they still fit the buffer.
#[derive(Debug, Clone, Copy)]
pub struct SourceOffsets<'a> {
    text: &'a str,
}

impl<'a> SourceOffsets<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl OffsetTranslator for SourceOffsets<'_> {
    fn offset(&self, pos: TextSize) -> Result<TextSize, OffsetError> {
        let len = TextSize::of(self.text);
        if pos > len {
            return Err(OffsetError::OutOfBounds { offset: pos, len });
        }
        if !self.text.is_char_boundary(u32::from(pos) as usize) {
            return Err(OffsetError::NotCharBoundary { offset: pos });
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_offsets_outside_the_buffer() {
        let offsets = SourceOffsets::new("x := 1");
        assert_eq!(offsets.offset(TextSize::from(6)), Ok(TextSize::from(6)));
        assert_eq!(
            offsets.offset(TextSize::from(7)),
            Err(OffsetError::OutOfBounds {
                offset: TextSize::from(7),
                len: TextSize::from(6),
            })
        );
    }

    #[test]
    fn rejects_offsets_inside_a_character() {
        let offsets = SourceOffsets::new("é := 1");
        assert_eq!(
            offsets.range(TextRange::new(TextSize::from(1), TextSize::from(3))),
            Err(OffsetError::NotCharBoundary {
                offset: TextSize::from(1)
            })
        );
    }
}
