//! 单词业务服务
//!
//! 查询按"精确命中 → 母记录探测 → 在线获取 → 合并入库"的顺序执行，
//! 同一个单词在多语言反复查询下也只保留一行 word 记录。

use std::sync::Arc;

use thiserror::Error;

use crate::provider::{FetchedTranslation, ProviderError, TranslationProvider};
use crate::storage::{NewTranslation, StoreError, TranslationRow, WordRecord, WordRow, WordStore};

/// 查询错误类型
#[derive(Error, Debug)]
pub enum LookupError {
    /// 提供者正常应答但没有该单词的数据
    #[error("未找到单词: {0}")]
    WordNotFound(String),

    /// 翻译提供者不可用，与"查无此词"严格区分
    #[error("翻译提供者不可用: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    /// 存储层错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
}

/// 分页查询结果
#[derive(Debug)]
pub struct WordPage {
    /// 匹配过滤条件的单词总数，先于分页计算
    pub total_count: i64,
    pub words: Vec<ListedWord>,
}

/// 列表中的一个单词
#[derive(Debug)]
pub struct ListedWord {
    pub word: WordRow,
    /// 仅在请求要求携带翻译时为 Some
    pub translations: Option<Vec<TranslationRow>>,
}

/// 词库统计
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    pub words: i64,
    pub translations: i64,
}

/// 单词服务
pub struct WordService {
    store: WordStore,
    provider: Arc<dyn TranslationProvider>,
}

impl WordService {
    pub fn new(store: WordStore, provider: Arc<dyn TranslationProvider>) -> Self {
        Self { store, provider }
    }

    /// 查询单词的指定目标语言翻译
    ///
    /// 命中缓存时不触发在线请求也不产生任何写入；未命中时从提供者取数，
    /// 按母记录是否存在决定追加翻译还是新建单词，并在单个事务中落库。
    pub async fn lookup(&self, word: &str, target_lang: &str) -> Result<WordRecord, LookupError> {
        // 1. 精确命中：该目标语言已有缓存
        if let Some(record) = self
            .store
            .find_word_with_translation(word, target_lang)
            .await?
        {
            tracing::debug!("缓存命中: word={}, target_lang={}", word, target_lang);
            return Ok(record);
        }

        // 2. 母记录探测，决定后续是追加还是新建
        let parent = self.store.find_word(word).await?;

        // 3. 在线获取，失败时不落任何数据
        let fetched = self
            .provider
            .fetch_translation(word, target_lang)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "提供者 {} 查询失败: word={}, 错误: {}",
                    self.provider.name(),
                    word,
                    e
                );
                e
            })?;

        if is_empty_result(&fetched) {
            // 提供者正常应答但没有任何内容，视为查无此词
            return Err(LookupError::WordNotFound(word.to_string()));
        }

        let FetchedTranslation {
            origin_language,
            src,
            sentences,
            data,
        } = fetched;
        let translation = NewTranslation {
            src,
            sentences,
            data,
        };

        // 4/5. 合并或新建
        let record = match parent {
            Some(parent) => {
                tracing::info!("追加翻译: word={}, target_lang={}", word, target_lang);
                self.store.append_translation(parent.id, translation).await?;
                let translations = self.store.translations_for(parent.id).await?;
                WordRecord {
                    word: parent,
                    translations,
                }
            }
            None => {
                tracing::info!(
                    "新建单词: word={}, origin_language={}, target_lang={}",
                    word,
                    origin_language,
                    target_lang
                );
                self.store
                    .create_word(word, &origin_language, translation)
                    .await?
            }
        };

        Ok(record)
    }

    /// 分页取出单词列表
    ///
    /// 总数口径只看过滤条件；`include_translations` 同时控制候选范围
    /// （仅取拥有翻译的单词）和响应中是否携带翻译内容。
    pub async fn list(
        &self,
        skip: i64,
        limit: i64,
        include_translations: bool,
        word_filter: Option<&str>,
    ) -> Result<WordPage, StoreError> {
        let total_count = self.store.count_words(word_filter).await?;

        let rows = self
            .store
            .list_words(skip, limit, include_translations, word_filter)
            .await?;

        let mut words = Vec::with_capacity(rows.len());
        for row in rows {
            let translations = if include_translations {
                Some(self.store.translations_for(row.id).await?)
            } else {
                None
            };
            words.push(ListedWord {
                word: row,
                translations,
            });
        }

        Ok(WordPage { total_count, words })
    }

    /// 删除单词及其全部翻译
    ///
    /// 返回是否真的删除了记录，id 不存在不算错误。
    pub async fn delete(&self, word_id: i64) -> Result<bool, StoreError> {
        let deleted = self.store.delete_word(word_id).await?;
        if deleted {
            tracing::info!("删除单词: id={}", word_id);
        } else {
            tracing::debug!("删除目标不存在: id={}", word_id);
        }
        Ok(deleted)
    }

    /// 词库统计，用于状态接口
    pub async fn stats(&self) -> Result<StoreStats, StoreError> {
        Ok(StoreStats {
            words: self.store.count_words(None).await?,
            translations: self.store.count_translations().await?,
        })
    }
}

fn is_empty_result(fetched: &FetchedTranslation) -> bool {
    fetched.sentences.is_empty() && fetched.data.as_ref().map_or(true, |d| d.is_empty())
}
