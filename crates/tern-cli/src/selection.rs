use anyhow::{bail, Context, Result};
use tern_core::{LineCol, LineIndex, TextRange, TextSize};

/// A selection given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Selection {
    /// `--range <start>..<end>`: byte offsets.
    Bytes { start: u32, end: u32 },
    /// `--line <L>[:<C>]`: 1-based line and byte column. Without a column the cursor sits on
    /// the first non-blank character of the line.
    Line { line: u32, column: Option<u32> },
}

pub(crate) fn parse_range(value: &str) -> Result<Selection, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected `<start>..<end>`, got `{value}`"))?;
    let start = parse_number(start, "start offset")?;
    let end = parse_number(end, "end offset")?;
    if start > end {
        return Err(format!("range start {start} is after its end {end}"));
    }
    Ok(Selection::Bytes { start, end })
}

pub(crate) fn parse_line(value: &str) -> Result<Selection, String> {
    let (line, column) = match value.split_once(':') {
        Some((line, column)) => (line, Some(parse_number(column, "column")?)),
        None => (value, None),
    };
    let line = parse_number(line, "line")?;
    if line == 0 || column == Some(0) {
        return Err("lines and columns start at 1".to_string());
    }
    Ok(Selection::Line { line, column })
}

fn parse_number(value: &str, what: &str) -> Result<u32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what} `{value}`"))
}

impl Selection {
    /// Resolves the selection to a byte range of `text`.
    pub(crate) fn resolve(self, text: &str, index: &LineIndex) -> Result<TextRange> {
        let range = match self {
            Selection::Bytes { start, end } => TextRange::new(start.into(), end.into()),
            Selection::Line { line, column } => {
                let line = line - 1;
                let line_range = index
                    .line_range(line)
                    .with_context(|| format!("line {} is past the end of the file", line + 1))?;
                let offset = match column {
                    Some(column) => index
                        .offset(LineCol {
                            line,
                            col: column - 1,
                        })
                        .with_context(|| {
                            format!("column {column} is past the end of line {}", line + 1)
                        })?,
                    None => {
                        let line_text = &text[line_range];
                        let indent = line_text.len() - line_text.trim_start().len();
                        line_range.start() + TextSize::from(indent as u32)
                    }
                };
                TextRange::empty(offset)
            }
        };

        if range.end() > TextSize::of(text) {
            bail!(
                "selection {:?} is past the end of the file ({} bytes)",
                range,
                text.len()
            );
        }
        for offset in [range.start(), range.end()] {
            if !text.is_char_boundary(u32::from(offset) as usize) {
                bail!("offset {} splits a UTF-8 character", u32::from(offset));
            }
        }
        Ok(range)
    }
}
