//! Core text primitives shared by the Tern crates.
//!
//! Everything here works on UTF-8 byte offsets. Conversions to LSP positions
//! (UTF-16 code units) go through [`LineIndex`].

mod edit;
mod text;

pub use edit::{apply_text_edits, normalize_text_edits, EditError, TextEdit};
pub use text::{
    indentation_at, line_terminator, LineCol, LineIndex, TextRange, TextSize, WideLineCol,
};
