use text_size::{TextRange, TextSize};

const START_MARKER: &str = "/*start*/";
const END_MARKER: &str = "/*end*/";
const CURSOR_MARKER: &str = "$0";

/// Extracts a byte range selection from a fixture containing `/*start*/` and
/// `/*end*/` markers.
///
/// Returns the fixture with markers removed and the selection pointing at the extracted
/// region.
pub fn extract_range(fixture: &str) -> (String, TextRange) {
    let start = fixture
        .find(START_MARKER)
        .expect("fixture missing /*start*/ marker");
    let after_start = start + START_MARKER.len();
    let end = fixture
        .find(END_MARKER)
        .expect("fixture missing /*end*/ marker");
    assert!(end >= after_start, "/*end*/ must come after /*start*/");

    let mut text = String::with_capacity(fixture.len());
    text.push_str(&fixture[..start]);
    text.push_str(&fixture[after_start..end]);
    text.push_str(&fixture[end + END_MARKER.len()..]);

    // The end shrinks by the length of the start marker.
    let range = TextRange::new(offset(start), offset(end - START_MARKER.len()));
    (text, range)
}

/// Extracts a cursor offset from a fixture containing a single `$0` marker.
pub fn extract_cursor(fixture: &str) -> (String, TextSize) {
    let idx = fixture
        .find(CURSOR_MARKER)
        .expect("fixture missing $0 marker");
    assert!(
        fixture[idx + CURSOR_MARKER.len()..]
            .find(CURSOR_MARKER)
            .is_none(),
        "fixture has more than one $0 marker"
    );
    let mut text = String::with_capacity(fixture.len());
    text.push_str(&fixture[..idx]);
    text.push_str(&fixture[idx + CURSOR_MARKER.len()..]);
    (text, offset(idx))
}

fn offset(idx: usize) -> TextSize {
    TextSize::try_from(idx).expect("fixture fits in u32")
}
