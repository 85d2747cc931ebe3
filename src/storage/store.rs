//! 单词存储实现
//!
//! 连接时自动建表并启用外键，所有写操作都在显式事务中提交。

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use thiserror::Error;

use super::models::{NewTranslation, TranslationRow, WordRecord, WordRow};

/// 存储层错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// 连接或建表失败
    #[error("数据库连接失败: {0}")]
    Connect(String),

    /// 查询执行失败
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
}

/// 建表语句，按依赖顺序执行
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS word (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        word TEXT NOT NULL,
        origin_language TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_word_word ON word (word)",
    "CREATE TABLE IF NOT EXISTS translation (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        word_id INTEGER NOT NULL REFERENCES word (id) ON DELETE CASCADE,
        src TEXT NOT NULL,
        sentences TEXT NOT NULL DEFAULT '[]',
        data TEXT
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_translation_word_src ON translation (word_id, src)",
];

/// 单词存储
#[derive(Clone)]
pub struct WordStore {
    pool: SqlitePool,
}

impl WordStore {
    /// 连接数据库并初始化表结构
    ///
    /// SQLite 的外键约束默认关闭，必须逐连接启用，否则级联删除不生效。
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Connect(format!("{}: {}", database_url, e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        // 内存库的每个连接都是一个独立数据库，池必须收敛到单连接
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            max_connections
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connect(format!("{}: {}", database_url, e)))?;

        let store = Self { pool };
        store.init_schema().await?;

        tracing::info!("单词存储初始化完成: {}", database_url);
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// 查找已缓存指定目标语言的单词（命中时携带全部翻译）
    pub async fn find_word_with_translation(
        &self,
        word: &str,
        src: &str,
    ) -> Result<Option<WordRecord>, StoreError> {
        let row = sqlx::query_as::<_, WordRow>(
            "SELECT w.id, w.word, w.origin_language FROM word w
             WHERE w.word = ?1
               AND EXISTS (SELECT 1 FROM translation t WHERE t.word_id = w.id AND t.src = ?2)
             LIMIT 1",
        )
        .bind(word)
        .bind(src)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(word_row) => {
                let translations = self.translations_for(word_row.id).await?;
                Ok(Some(WordRecord {
                    word: word_row,
                    translations,
                }))
            }
            None => Ok(None),
        }
    }

    /// 查找单词本体，不关心目标语言
    pub async fn find_word(&self, word: &str) -> Result<Option<WordRow>, StoreError> {
        Ok(sqlx::query_as::<_, WordRow>(
            "SELECT id, word, origin_language FROM word WHERE word = ?1 LIMIT 1",
        )
        .bind(word)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// 按插入顺序取出单词的全部翻译
    pub async fn translations_for(&self, word_id: i64) -> Result<Vec<TranslationRow>, StoreError> {
        Ok(sqlx::query_as::<_, TranslationRow>(
            "SELECT id, word_id, src, sentences, data FROM translation
             WHERE word_id = ?1 ORDER BY id",
        )
        .bind(word_id)
        .fetch_all(&self.pool)
        .await?)
    }

    /// 新建单词及其第一条翻译
    pub async fn create_word(
        &self,
        word: &str,
        origin_language: &str,
        translation: NewTranslation,
    ) -> Result<WordRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO word (word, origin_language) VALUES (?1, ?2)")
            .bind(word)
            .bind(origin_language)
            .execute(&mut *tx)
            .await?;
        let word_id = result.last_insert_rowid();

        insert_translation(&mut tx, word_id, &translation).await?;

        tx.commit().await?;

        let translations = self.translations_for(word_id).await?;
        Ok(WordRecord {
            word: WordRow {
                id: word_id,
                word: word.to_string(),
                origin_language: origin_language.to_string(),
            },
            translations,
        })
    }

    /// 给已有单词追加一条翻译
    ///
    /// 同一 (word_id, src) 已存在时静默忽略，并发的重复查询不会堆积重复行。
    pub async fn append_translation(
        &self,
        word_id: i64,
        translation: NewTranslation,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        insert_translation(&mut tx, word_id, &translation).await?;
        tx.commit().await?;
        Ok(())
    }

    /// 统计匹配过滤条件的单词总数（不受分页影响）
    pub async fn count_words(&self, word_filter: Option<&str>) -> Result<i64, StoreError> {
        let count = match word_filter.filter(|f| !f.is_empty()) {
            Some(filter) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM word WHERE word LIKE '%' || ?1 || '%'")
                    .bind(filter)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM word")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    /// 分页取出单词列表
    ///
    /// `only_with_translations` 为 true 时只取拥有翻译的单词作为候选，
    /// 与 `count_words` 的口径允许不一致。
    pub async fn list_words(
        &self,
        skip: i64,
        limit: i64,
        only_with_translations: bool,
        word_filter: Option<&str>,
    ) -> Result<Vec<WordRow>, StoreError> {
        // 按条件拼接查询
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, word, origin_language FROM word");

        let mut has_where = false;
        if let Some(filter) = word_filter.filter(|f| !f.is_empty()) {
            builder.push(" WHERE word LIKE '%' || ");
            builder.push_bind(filter);
            builder.push(" || '%'");
            has_where = true;
        }
        if only_with_translations {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push("EXISTS (SELECT 1 FROM translation t WHERE t.word_id = word.id)");
        }

        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(skip);

        Ok(builder
            .build_query_as::<WordRow>()
            .fetch_all(&self.pool)
            .await?)
    }

    /// 删除单词，翻译由外键级联删除
    ///
    /// 返回是否真的删除了一行。
    pub async fn delete_word(&self, word_id: i64) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM word WHERE id = ?1")
            .bind(word_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// 统计翻译总数
    pub async fn count_translations(&self) -> Result<i64, StoreError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM translation")
            .fetch_one(&self.pool)
            .await?)
    }
}

async fn insert_translation(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    word_id: i64,
    translation: &NewTranslation,
) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO translation (word_id, src, sentences, data) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (word_id, src) DO NOTHING",
    )
    .bind(word_id)
    .bind(&translation.src)
    .bind(Json(&translation.sentences))
    .bind(translation.data.as_ref().map(Json))
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn memory_store() -> WordStore {
        WordStore::connect("sqlite::memory:", 5).await.unwrap()
    }

    fn sample_translation(src: &str) -> NewTranslation {
        NewTranslation {
            src: src.to_string(),
            sentences: vec![json!({"trans": "苹果", "orig": "apple"})],
            data: Some(vec![json!({"pos": "noun", "terms": ["苹果"]})]),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_word() {
        let store = memory_store().await;

        let record = store
            .create_word("apple", "en", sample_translation("zh"))
            .await
            .unwrap();
        assert_eq!(record.word.word, "apple");
        assert_eq!(record.word.origin_language, "en");
        assert_eq!(record.translations.len(), 1);
        assert_eq!(record.translations[0].src, "zh");
        assert_eq!(record.translations[0].sentences.0[0]["trans"], "苹果");

        // 按目标语言命中
        let hit = store
            .find_word_with_translation("apple", "zh")
            .await
            .unwrap();
        assert!(hit.is_some());

        // 未缓存的目标语言不命中
        let miss = store
            .find_word_with_translation("apple", "pt")
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_append_translation_accumulates() {
        let store = memory_store().await;

        let record = store
            .create_word("apple", "en", sample_translation("zh"))
            .await
            .unwrap();
        store
            .append_translation(record.word.id, sample_translation("pt"))
            .await
            .unwrap();

        let translations = store.translations_for(record.word.id).await.unwrap();
        assert_eq!(translations.len(), 2);
        assert_eq!(translations[0].src, "zh");
        assert_eq!(translations[1].src, "pt");
    }

    #[tokio::test]
    async fn test_duplicate_translation_ignored() {
        let store = memory_store().await;

        let record = store
            .create_word("apple", "en", sample_translation("zh"))
            .await
            .unwrap();
        store
            .append_translation(record.word.id, sample_translation("zh"))
            .await
            .unwrap();

        // 唯一索引挡住了重复的 (word_id, src)
        let translations = store.translations_for(record.word.id).await.unwrap();
        assert_eq!(translations.len(), 1);
    }

    #[tokio::test]
    async fn test_null_data_round_trip() {
        let store = memory_store().await;

        let translation = NewTranslation {
            src: "zh".to_string(),
            sentences: vec![json!({"trans": "一个苹果"})],
            data: None,
        };
        let record = store.create_word("an apple", "en", translation).await.unwrap();

        assert!(record.translations[0].data.is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_translations() {
        let store = memory_store().await;

        let record = store
            .create_word("apple", "en", sample_translation("zh"))
            .await
            .unwrap();
        store
            .append_translation(record.word.id, sample_translation("pt"))
            .await
            .unwrap();
        assert_eq!(store.count_translations().await.unwrap(), 2);

        let deleted = store.delete_word(record.word.id).await.unwrap();
        assert!(deleted);

        // 翻译行随单词一起消失
        assert_eq!(store.count_translations().await.unwrap(), 0);
        assert!(store.find_word("apple").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_word_reports_false() {
        let store = memory_store().await;
        let deleted = store.delete_word(9999).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_count_and_list_with_filter() {
        let store = memory_store().await;

        for word in ["challenge", "chalk", "apple"] {
            store
                .create_word(word, "en", sample_translation("zh"))
                .await
                .unwrap();
        }

        assert_eq!(store.count_words(None).await.unwrap(), 3);
        assert_eq!(store.count_words(Some("chal")).await.unwrap(), 2);
        // 大小写不敏感匹配
        assert_eq!(store.count_words(Some("CHAL")).await.unwrap(), 2);

        let page = store.list_words(0, 10, false, Some("chal")).await.unwrap();
        let words: Vec<&str> = page.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["challenge", "chalk"]);
    }

    #[tokio::test]
    async fn test_list_pagination_window() {
        let store = memory_store().await;

        for word in ["alpha", "bravo", "charlie", "delta"] {
            store
                .create_word(word, "en", sample_translation("zh"))
                .await
                .unwrap();
        }

        let page = store.list_words(1, 2, false, None).await.unwrap();
        let words: Vec<&str> = page.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, vec!["bravo", "charlie"]);
    }

    #[tokio::test]
    async fn test_list_only_with_translations() {
        let store = memory_store().await;

        store
            .create_word("apple", "en", sample_translation("zh"))
            .await
            .unwrap();
        // 直接塞入一个没有翻译的单词行
        sqlx::query("INSERT INTO word (word, origin_language) VALUES ('bare', 'en')")
            .execute(&store.pool)
            .await
            .unwrap();

        let all = store.list_words(0, 10, false, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let with_translations = store.list_words(0, 10, true, None).await.unwrap();
        assert_eq!(with_translations.len(), 1);
        assert_eq!(with_translations[0].word, "apple");

        // 总数口径不受翻译联接影响
        assert_eq!(store.count_words(None).await.unwrap(), 2);
    }
}
