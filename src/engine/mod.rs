pub mod pipeline;

pub use pipeline::{Engine, Page};
