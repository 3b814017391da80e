pub mod error;
pub mod lex;
pub mod net;
pub mod render;
pub mod engine;

pub use error::{Error, Result};
