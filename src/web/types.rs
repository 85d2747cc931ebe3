//! Web 模块的数据类型定义
//!
//! 请求与响应各自使用显式结构体，不与存储层行模型混用。

use serde::{Deserialize, Serialize};

use crate::storage::{TranslationRow, WordRecord};
use crate::words::{ListedWord, WordService};

/// 应用状态
pub struct AppState {
    pub word_service: WordService,
    /// 查询未指定目标语言时的回退值
    pub default_target_lang: String,
}

/// 单词查询请求参数
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub translated_language: Option<String>,
}

/// 单词列表请求参数
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub include_translations: Option<bool>,
    pub word_filter: Option<String>,
}

/// 翻译响应体
#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub id: i64,
    pub word_id: i64,
    pub src: String,
    pub sentences: Vec<serde_json::Value>,
    pub data: Option<Vec<serde_json::Value>>,
}

/// 单词查询响应体，携带全部翻译
#[derive(Debug, Serialize)]
pub struct WordResponse {
    pub id: i64,
    pub word: String,
    pub origin_language: String,
    pub translations: Vec<TranslationResponse>,
}

/// 列表中的单词条目
#[derive(Debug, Serialize)]
pub struct WordSummary {
    pub id: i64,
    pub word: String,
    pub origin_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<TranslationResponse>>,
}

/// 分页列表响应体
#[derive(Debug, Serialize)]
pub struct PaginatedWords {
    /// 匹配过滤条件的总数，与当前页是否联接翻译无关
    pub total_count: i64,
    pub words: Vec<WordSummary>,
}

/// 删除操作响应体
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// 服务状态响应体
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: &'static str,
    pub database: String,
    pub words: i64,
    pub translations: i64,
}

impl From<TranslationRow> for TranslationResponse {
    fn from(row: TranslationRow) -> Self {
        Self {
            id: row.id,
            word_id: row.word_id,
            src: row.src,
            sentences: row.sentences.0,
            data: row.data.map(|d| d.0),
        }
    }
}

impl From<WordRecord> for WordResponse {
    fn from(record: WordRecord) -> Self {
        Self {
            id: record.word.id,
            word: record.word.word,
            origin_language: record.word.origin_language,
            translations: record.translations.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ListedWord> for WordSummary {
    fn from(listed: ListedWord) -> Self {
        Self {
            id: listed.word.id,
            word: listed.word.word,
            origin_language: listed.word.origin_language,
            translations: listed
                .translations
                .map(|rows| rows.into_iter().map(Into::into).collect()),
        }
    }
}
