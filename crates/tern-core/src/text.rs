//! Line and column bookkeeping over UTF-8 text.

pub use text_size::{TextRange, TextSize};

/// Zero-based line and byte column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Zero-based line and UTF-16 column, the coordinates LSP clients speak.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct WideLineCol {
    pub line: u32,
    pub col: u32,
}

/// The content range of every line of a text, terminators excluded.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIndex {
    lines: Vec<TextRange>,
}

fn size(offset: usize) -> TextSize {
    TextSize::from(offset as u32)
}

fn slice(text: &str, range: TextRange) -> Option<&str> {
    text.get(std::ops::Range::<usize>::from(range))
}

impl LineIndex {
    pub fn new(text: &str) -> LineIndex {
        let bytes = text.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(len) = bytes[start..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
        {
            let end = start + len;
            lines.push(TextRange::new(size(start), size(end)));
            start = match &bytes[end..] {
                [b'\r', b'\n', ..] => end + 2,
                _ => end + 1,
            };
        }
        lines.push(TextRange::new(size(start), size(bytes.len())));
        LineIndex { lines }
    }

    /// Line containing `offset`; a terminator belongs to the line it ends. Offsets past the
    /// end land on the last line.
    pub fn line_of(&self, offset: TextSize) -> u32 {
        let after = self.lines.partition_point(|line| line.start() <= offset);
        after.saturating_sub(1) as u32
    }

    pub fn line_range(&self, line: u32) -> Option<TextRange> {
        self.lines.get(line as usize).copied()
    }

    /// Offsets inside a terminator clamp to the end of their line.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self.line_of(offset);
        let range = self.lines[line as usize];
        let col = offset.clamp(range.start(), range.end()) - range.start();
        LineCol {
            line,
            col: col.into(),
        }
    }

    /// `None` when the line does not exist or the column runs past its end.
    pub fn offset(&self, at: LineCol) -> Option<TextSize> {
        let range = self.line_range(at.line)?;
        let offset = range.start().checked_add(TextSize::from(at.col))?;
        (offset <= range.end()).then_some(offset)
    }

    /// UTF-16 coordinates of `offset` in `text`, the snapshot this index was built from.
    ///
    /// An offset in the middle of a character counts that character.
    pub fn to_wide(&self, text: &str, offset: TextSize) -> WideLineCol {
        let LineCol { line, col } = self.line_col(offset);
        let range = self.lines[line as usize];
        let col = slice(text, range)
            .unwrap_or_default()
            .char_indices()
            .take_while(|&(idx, _)| (idx as u32) < col)
            .map(|(_, ch)| ch.len_utf16() as u32)
            .sum();
        WideLineCol { line, col }
    }

    /// Byte offset of UTF-16 coordinates. `None` past the end of the line or between the two
    /// halves of a surrogate pair.
    pub fn from_wide(&self, text: &str, at: WideLineCol) -> Option<TextSize> {
        let range = self.line_range(at.line)?;
        let mut units = 0;
        for (idx, ch) in slice(text, range)?.char_indices() {
            if units >= at.col {
                return (units == at.col).then(|| range.start() + size(idx));
            }
            units += ch.len_utf16() as u32;
        }
        (units == at.col).then_some(range.end())
    }
}

/// The terminator of the first line of `text`, or `"\n"` for single-line text.
pub fn line_terminator(text: &str) -> &'static str {
    match text.find(['\n', '\r']).map(|at| &text.as_bytes()[at..]) {
        Some([b'\r', b'\n', ..]) => "\r\n",
        Some([b'\r', ..]) => "\r",
        _ => "\n",
    }
}

/// Spaces and tabs that open the line containing `offset`.
pub fn indentation_at<'a>(text: &'a str, index: &LineIndex, offset: TextSize) -> &'a str {
    let line = index
        .line_range(index.line_of(offset))
        .and_then(|range| slice(text, range))
        .unwrap_or_default();
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

#[cfg(feature = "lsp")]
impl From<WideLineCol> for lsp_types::Position {
    fn from(at: WideLineCol) -> Self {
        lsp_types::Position::new(at.line, at.col)
    }
}

#[cfg(feature = "lsp")]
impl From<lsp_types::Position> for WideLineCol {
    fn from(pos: lsp_types::Position) -> Self {
        WideLineCol {
            line: pos.line,
            col: pos.character,
        }
    }
}
