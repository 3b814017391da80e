pub mod layout;
pub mod viewport;

pub use layout::{layout, DisplayItem, DisplayList, HSTEP, VSTEP};
pub use viewport::{Canvas, Viewport, SCROLL_STEP};
