use lsp_types::{Position, TextEdit};
use tern_core::{LineIndex, TextRange, TextSize};

/// Converts a UTF-8 byte offset into an LSP UTF-16 position.
#[must_use]
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let index = LineIndex::new(text);
    let offset = TextSize::try_from(offset.min(text.len())).expect("text fits in u32");
    index.to_wide(text, offset).into()
}

/// Converts an LSP UTF-16 position into a UTF-8 byte offset.
///
/// Returns `None` if the position is not representable in `text`.
#[must_use]
pub fn position_to_offset(text: &str, pos: Position) -> Option<usize> {
    let index = LineIndex::new(text);
    index
        .from_wide(text, pos.into())
        .map(|offset| u32::from(offset) as usize)
}

/// Applies LSP text edits (all relative to `text`) and returns the new text.
///
/// Panics when an edit range cannot be mapped onto `text` or edits overlap.
pub fn apply_lsp_edits(text: &str, edits: &[TextEdit]) -> String {
    let index = LineIndex::new(text);
    let edits: Vec<tern_core::TextEdit> = edits
        .iter()
        .map(|edit| {
            let offset = |pos: Position| {
                index
                    .from_wide(text, pos.into())
                    .unwrap_or_else(|| panic!("edit range {:?} is not valid for the text", edit.range))
            };
            let range = TextRange::new(offset(edit.range.start), offset(edit.range.end));
            tern_core::TextEdit::new(range, edit.new_text.clone())
        })
        .collect();
    tern_core::apply_text_edits(text, &edits).expect("edits apply cleanly")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp_types::Range;
    use pretty_assertions::assert_eq;

    #[test]
    fn roundtrips_offsets_at_char_boundaries() {
        let text = "a\n😃b\nαβ";
        for offset in [0, 1, 2, "a\n".len(), "a\n😃".len(), text.len()] {
            let pos = offset_to_position(text, offset);
            let back =
                position_to_offset(text, pos).expect("position from offset should roundtrip");
            assert_eq!(back, offset);
        }
    }

    #[test]
    fn applies_edits_in_any_order() {
        let text = "one\ntwo\nthree\n";
        let edits = vec![
            TextEdit {
                range: Range::new(Position::new(2, 0), Position::new(2, 5)),
                new_text: "3".into(),
            },
            TextEdit {
                range: Range::new(Position::new(0, 0), Position::new(0, 3)),
                new_text: "1".into(),
            },
        ];
        assert_eq!(apply_lsp_edits(text, &edits), "1\ntwo\n3\n");
    }
}
