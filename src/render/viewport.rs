use crate::render::layout::DisplayList;

/// Vertical distance covered by one scroll event, in layout units.
pub const SCROLL_STEP: i32 = 100;

/// The external rendering surface the viewport draws into.
///
/// A draw pass is always a `clear` followed by one `draw_glyph` per visible
/// item, in reading order.
pub trait Canvas {
    fn clear(&mut self);
    fn draw_glyph(&mut self, x: i32, y: i32, glyph: char);
}

/// Scroll state plus the cached display list for the loaded document.
///
/// The viewport owns both exclusively; navigation replaces the list and
/// resets the offset, scroll events only move the offset. The top and
/// bottom margins of one `vstep` are reserved and never drawn into.
pub struct Viewport {
    width: i32,
    height: i32,
    vstep: i32,
    scroll_offset: i32,
    last_content_bottom: i32,
    display_list: DisplayList,
}

impl Viewport {
    pub fn new(width: i32, height: i32, vstep: i32) -> Self {
        Self {
            width,
            height,
            vstep,
            scroll_offset: 0,
            last_content_bottom: 0,
            display_list: Vec::new(),
        }
    }

    /// Layout width the display list was produced for.
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    /// Install the display list for a freshly loaded document and draw it
    /// from the top.
    pub fn on_load(&mut self, display_list: DisplayList, canvas: &mut impl Canvas) {
        self.scroll_offset = 0;
        self.display_list = display_list;
        self.draw(canvas);
    }

    /// Clip the cached display list to the visible band and emit it.
    ///
    /// The last clipped y is tracked across the whole list, visible or not,
    /// so bottom-of-content detection works even when the final glyph is
    /// currently off-screen.
    pub fn draw(&mut self, canvas: &mut impl Canvas) {
        canvas.clear();
        let mut bottom = 0;
        for item in &self.display_list {
            let clipped_y = item.y - self.scroll_offset;
            if clipped_y >= self.vstep && clipped_y <= self.height - self.vstep {
                canvas.draw_glyph(item.x, clipped_y, item.glyph);
            }
            bottom = clipped_y;
        }
        self.last_content_bottom = bottom;
    }

    /// Apply a scroll event. Positive `delta` scrolls up, negative scrolls
    /// down, zero is ignored.
    ///
    /// An upward scroll that would push the offset negative clamps to zero
    /// without redrawing; a downward scroll is rejected outright once the
    /// bottom of the content is already inside the visible band. Any
    /// accepted change triggers a full redraw.
    pub fn on_scroll(&mut self, delta: i32, canvas: &mut impl Canvas) {
        if delta == 0 {
            return;
        }
        if delta > 0 {
            if self.scroll_offset - SCROLL_STEP < 0 {
                self.scroll_offset = 0;
                return;
            }
            self.scroll_offset -= SCROLL_STEP;
        } else {
            if self.last_content_bottom <= self.height - self.vstep {
                return;
            }
            self.scroll_offset += SCROLL_STEP;
        }
        self.draw(canvas);
    }
}
