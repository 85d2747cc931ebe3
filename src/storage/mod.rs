//! 关系型单词存储模块
//!
//! 基于 SQLite 持久化单词及其翻译，word 与 translation 一对多，
//! 删除单词时级联删除其全部翻译。

pub mod models;
pub mod store;

pub use models::{NewTranslation, TranslationRow, WordRecord, WordRow};
pub use store::{StoreError, WordStore};
