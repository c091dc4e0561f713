// Utility functions

pub mod logger;
pub mod markdown;

pub use logger::*;
pub use markdown::render_markdown;
