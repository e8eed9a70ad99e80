use std::collections::BTreeMap;

use tern_core::{TextEdit, TextRange, TextSize};
use thiserror::Error;

/// Identifier for a document taking part in an edit, usually its URI.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single edit in one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceTextEdit {
    pub file: FileId,
    pub range: TextRange,
    pub replacement: String,
}

impl WorkspaceTextEdit {
    pub fn replace(file: FileId, range: TextRange, text: impl Into<String>) -> Self {
        Self {
            file,
            range,
            replacement: text.into(),
        }
    }

    pub fn to_text_edit(&self) -> TextEdit {
        TextEdit::new(self.range, self.replacement.clone())
    }
}

/// A set of edits across potentially multiple files.
///
/// Call [`WorkspaceEdit::normalize`] before applying or converting to LSP.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceEdit {
    pub edits: Vec<WorkspaceTextEdit>,
}

impl WorkspaceEdit {
    pub fn new(edits: Vec<WorkspaceTextEdit>) -> Self {
        Self { edits }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns the edits grouped by file, each group sorted by range.
    pub fn edits_by_file(&self) -> BTreeMap<&FileId, Vec<TextEdit>> {
        let mut map: BTreeMap<&FileId, Vec<TextEdit>> = BTreeMap::new();
        for edit in &self.edits {
            map.entry(&edit.file).or_default().push(edit.to_text_edit());
        }
        for edits in map.values_mut() {
            edits.sort_by(|a, b| {
                a.range
                    .start()
                    .cmp(&b.range.start())
                    .then_with(|| a.range.end().cmp(&b.range.end()))
                    .then_with(|| a.replacement.cmp(&b.replacement))
            });
        }
        map
    }

    /// Sorts, deduplicates and merges the edits, rejecting overlaps within a file.
    pub fn normalize(&mut self) -> Result<(), EditError> {
        self.edits.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.range.start().cmp(&b.range.start()))
                .then_with(|| a.range.end().cmp(&b.range.end()))
                .then_with(|| a.replacement.cmp(&b.replacement))
        });
        self.edits.dedup();

        // Inserts at the same offset are concatenated in sorted order.
        let mut merged: Vec<WorkspaceTextEdit> = Vec::with_capacity(self.edits.len());
        for edit in self.edits.drain(..) {
            if let Some(last) = merged.last_mut() {
                if last.file == edit.file && last.range == edit.range {
                    if last.range.is_empty() {
                        last.replacement.push_str(&edit.replacement);
                        continue;
                    }
                    return Err(EditError::OverlappingEdits {
                        file: edit.file,
                        first: last.range,
                        second: edit.range,
                    });
                }
            }
            merged.push(edit);
        }
        self.edits = merged;

        for pair in self.edits.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.file == next.file && next.range.start() < prev.range.end() {
                return Err(EditError::OverlappingEdits {
                    file: next.file.clone(),
                    first: prev.range,
                    second: next.range,
                });
            }
        }

        Ok(())
    }

    /// Applies the edits that target `file` to `original`.
    pub fn apply_to(&self, file: &FileId, original: &str) -> Result<String, EditError> {
        let edits: Vec<TextEdit> = self
            .edits
            .iter()
            .filter(|edit| &edit.file == file)
            .map(WorkspaceTextEdit::to_text_edit)
            .collect();
        tern_core::apply_text_edits(original, &edits).map_err(|err| EditError::from_core(file, err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("overlapping edits in {file:?}: {first:?} overlaps {second:?}")]
    OverlappingEdits {
        file: FileId,
        first: TextRange,
        second: TextRange,
    },
    #[error("text edit range {range:?} is outside the file bounds (len={len:?}) in {file:?}")]
    OutOfBounds {
        file: FileId,
        range: TextRange,
        len: TextSize,
    },
    #[error("offset {offset:?} splits a UTF-8 character in {file:?}")]
    NotCharBoundary { file: FileId, offset: TextSize },
}

impl EditError {
    pub(crate) fn from_core(file: &FileId, err: tern_core::EditError) -> Self {
        let file = file.clone();
        match err {
            tern_core::EditError::RangeOutOfBounds { range, text_len } => EditError::OutOfBounds {
                file,
                range,
                len: text_len,
            },
            tern_core::EditError::InvalidUtf8Boundary { offset } => {
                EditError::NotCharBoundary { file, offset }
            }
            tern_core::EditError::OverlappingEdits { first, second } => {
                EditError::OverlappingEdits {
                    file,
                    first,
                    second,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(start.into(), end.into())
    }

    #[test]
    fn normalize_merges_inserts_and_sorts() {
        let file = FileId::new("file:///a.go");
        let mut edit = WorkspaceEdit::new(vec![
            WorkspaceTextEdit::replace(file.clone(), range(4, 6), "x"),
            WorkspaceTextEdit::replace(file.clone(), range(0, 0), "b"),
            WorkspaceTextEdit::replace(file.clone(), range(0, 0), "a"),
            WorkspaceTextEdit::replace(file.clone(), range(4, 6), "x"),
        ]);
        edit.normalize().unwrap();

        assert_eq!(
            edit.edits,
            vec![
                WorkspaceTextEdit::replace(file.clone(), range(0, 0), "ab"),
                WorkspaceTextEdit::replace(file.clone(), range(4, 6), "x"),
            ]
        );
        assert_eq!(edit.apply_to(&file, "012345").unwrap(), "ab0123x");
    }

    #[test]
    fn normalize_rejects_overlaps_within_a_file_only() {
        let a = FileId::new("a");
        let b = FileId::new("b");
        let mut ok = WorkspaceEdit::new(vec![
            WorkspaceTextEdit::replace(a.clone(), range(0, 4), "x"),
            WorkspaceTextEdit::replace(b.clone(), range(2, 6), "y"),
        ]);
        ok.normalize().unwrap();

        let mut overlapping = WorkspaceEdit::new(vec![
            WorkspaceTextEdit::replace(a.clone(), range(0, 4), "x"),
            WorkspaceTextEdit::replace(a.clone(), range(2, 6), "y"),
        ]);
        assert_eq!(
            overlapping.normalize(),
            Err(EditError::OverlappingEdits {
                file: a,
                first: range(0, 4),
                second: range(2, 6),
            })
        );
    }

    #[test]
    fn apply_reports_out_of_bounds_ranges() {
        let file = FileId::new("a");
        let edit = WorkspaceEdit::new(vec![WorkspaceTextEdit::replace(file.clone(), range(2, 9), "")]);
        assert!(matches!(
            edit.apply_to(&file, "abc"),
            Err(EditError::OutOfBounds { .. })
        ));
    }
}
