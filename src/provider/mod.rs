//! 翻译提供者模块
//!
//! 定义统一的翻译提供者接口，并提供基于 Google 词典接口的默认实现。
//! 本地词库未命中的查询通过该模块请求在线翻译。

pub mod client;

pub use client::GoogleTranslateClient;

use async_trait::async_trait;
use thiserror::Error;

/// 翻译提供者错误类型
#[derive(Error, Debug)]
pub enum ProviderError {
    /// 网络错误（连接失败、超时、上游状态码异常）
    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    /// 响应解析错误
    #[error("响应解析错误: {0}")]
    Parse(String),

    /// 无效的接口地址
    #[error("无效的接口地址: {0}")]
    InvalidEndpoint(String),
}

/// 规范化后的翻译查询结果
///
/// `origin_language` 是提供者检测出的源语言；`src` 是本次查询的目标语言，
/// 与存储层 `translation.src` 列一致。
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTranslation {
    pub origin_language: String,
    pub src: String,
    pub sentences: Vec<serde_json::Value>,
    /// 词典义项，提供者未返回 `dict` 字段时为 None
    pub data: Option<Vec<serde_json::Value>>,
}

/// 翻译提供者接口
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 查询指定单词到目标语言的翻译数据
    async fn fetch_translation(
        &self,
        word: &str,
        target_lang: &str,
    ) -> Result<FetchedTranslation, ProviderError>;

    /// 提供者名称，用于日志
    fn name(&self) -> &str;
}
