//! 存储层数据模型

use sqlx::types::Json;
use sqlx::FromRow;

/// word 表中的一行
#[derive(Debug, Clone, FromRow)]
pub struct WordRow {
    pub id: i64,
    /// 查询键，跨源语言不保证唯一
    pub word: String,
    pub origin_language: String,
}

/// translation 表中的一行
///
/// `sentences` 与 `data` 以 JSON 文本存储，结构由提供者决定，
/// 存储层不做解释。
#[derive(Debug, Clone, FromRow)]
pub struct TranslationRow {
    pub id: i64,
    pub word_id: i64,
    /// 本条翻译的目标语言
    pub src: String,
    pub sentences: Json<Vec<serde_json::Value>>,
    pub data: Option<Json<Vec<serde_json::Value>>>,
}

/// 待插入的翻译数据
#[derive(Debug, Clone)]
pub struct NewTranslation {
    pub src: String,
    pub sentences: Vec<serde_json::Value>,
    pub data: Option<Vec<serde_json::Value>>,
}

/// 聚合了全部翻译的单词记录
#[derive(Debug, Clone)]
pub struct WordRecord {
    pub word: WordRow,
    pub translations: Vec<TranslationRow>,
}
