//! # Wordbook Library
//!
//! 单词翻译缓存服务：查询命中本地词库时直接返回，未命中时调用在线翻译
//! 接口取数并写入关系型存储，并对外提供分页列表与级联删除的 HTTP API。
//!
//! ## 模块组织
//!
//! - `env` - 环境变量配置系统
//! - `provider` - 在线翻译提供者客户端
//! - `storage` - 关系型单词存储
//! - `words` - 单词查询/列表/删除服务
//! - `web` - Web服务器功能

pub mod env;
pub mod provider;
pub mod storage;
pub mod web;
pub mod words;

// Re-export commonly used items for convenience
pub use provider::*;
pub use storage::*;
pub use words::*;
