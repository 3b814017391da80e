/// Default horizontal advance per glyph, in layout units.
pub const HSTEP: i32 = 8;
/// Default vertical advance per line, in layout units.
pub const VSTEP: i32 = 19;

/// A single positioned glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayItem {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
}

/// Positioned glyphs in reading order, produced once per navigation and
/// cached until the next one.
pub type DisplayList = Vec<DisplayItem>;

/// Lay text out on a fixed-advance character grid.
///
/// The cursor starts at `(hstep, vstep)`. Every character occupies one grid
/// cell and advances the cursor by `hstep`; when the advanced position would
/// reach `viewport_width - hstep` the cursor wraps to the next line. Wrapping
/// happens mid-run, not at word boundaries, and newline characters are laid
/// out like any other glyph. Pure: identical input yields an identical list.
pub fn layout(text: &str, viewport_width: i32, hstep: i32, vstep: i32) -> DisplayList {
    let mut display_list = Vec::with_capacity(text.len());
    let mut cursor_x = hstep;
    let mut cursor_y = vstep;

    for glyph in text.chars() {
        display_list.push(DisplayItem {
            x: cursor_x,
            y: cursor_y,
            glyph,
        });
        cursor_x += hstep;
        if cursor_x >= viewport_width - hstep {
            cursor_x = hstep;
            cursor_y += vstep;
        }
    }

    display_list
}
