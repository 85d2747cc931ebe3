//! API 处理器

pub mod status;
pub mod words;

pub use status::*;
pub use words::*;
