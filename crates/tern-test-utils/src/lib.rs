//! Utilities shared by Tern tests.
//!
//! Fixtures mark selections with `/*start*/` and `/*end*/` and cursors with `$0`; LSP edits
//! produced by refactorings can be applied back onto the fixture text.

#[cfg(feature = "fixture-ranges")]
mod fixture_ranges;

#[cfg(feature = "lsp-text")]
mod lsp_text;

#[cfg(feature = "fixture-ranges")]
pub use fixture_ranges::*;

#[cfg(feature = "lsp-text")]
pub use lsp_text::*;
