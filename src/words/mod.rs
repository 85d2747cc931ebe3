//! 单词业务模块
//!
//! 组织查询、列表、删除三类核心操作。

pub mod service;

pub use service::{ListedWord, LookupError, StoreStats, WordPage, WordService};
