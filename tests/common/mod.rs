// 集成测试公共模块
//
// 提供内存词库、可编程的翻译提供者桩和测试数据构造工具

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use wordbook::provider::{FetchedTranslation, ProviderError, TranslationProvider};
use wordbook::storage::WordStore;
use wordbook::web::{create_routes, AppState};
use wordbook::words::WordService;

/// 构造一个带例句和词典义项的翻译载荷
pub fn sample_translation(word: &str, target_lang: &str, origin_language: &str) -> FetchedTranslation {
    FetchedTranslation {
        origin_language: origin_language.to_string(),
        src: target_lang.to_string(),
        sentences: vec![json!({
            "orig": word,
            "trans": format!("{}-{}", word, target_lang),
        })],
        data: Some(vec![json!({
            "pos": "noun",
            "terms": [format!("{}-{}", word, target_lang)],
        })]),
    }
}

/// 可编程的翻译提供者桩
///
/// 预设 (单词, 目标语言) 到载荷的映射，记录实际发出的请求次数，
/// 未预设的组合返回空载荷，也可以切换为全部失败
pub struct StubProvider {
    responses: Mutex<HashMap<(String, String), FetchedTranslation>>,
    fail_all: AtomicBool,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            fail_all: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// 预设一个单词的翻译载荷
    pub fn add_translation(&self, word: &str, target_lang: &str, origin_language: &str) {
        let fetched = sample_translation(word, target_lang, origin_language);
        self.responses
            .lock()
            .unwrap()
            .insert((word.to_string(), target_lang.to_string()), fetched);
    }

    /// 让后续所有请求都返回错误
    pub fn fail_requests(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    /// 实际到达提供者的请求次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for StubProvider {
    async fn fetch_translation(
        &self,
        word: &str,
        target_lang: &str,
    ) -> Result<FetchedTranslation, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ProviderError::Parse("桩提供者被配置为失败".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        match responses.get(&(word.to_string(), target_lang.to_string())) {
            Some(found) => Ok(found.clone()),
            // 未预设的组合模拟提供者查不到内容的情况
            None => Ok(FetchedTranslation {
                origin_language: "en".to_string(),
                src: target_lang.to_string(),
                sentences: Vec::new(),
                data: None,
            }),
        }
    }

    fn name(&self) -> &str {
        "stub-provider"
    }
}

/// 测试环境：内存词库加可编程提供者
pub struct TestEnvironment {
    pub service: WordService,
    pub provider: Arc<StubProvider>,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let store = WordStore::connect("sqlite::memory:", 1)
            .await
            .expect("内存词库初始化失败");
        let provider = Arc::new(StubProvider::new());
        let service = WordService::new(store, provider.clone());

        Self { service, provider }
    }
}

/// 构建挂载完整路由的测试应用
pub async fn test_app() -> (Router, Arc<StubProvider>) {
    let store = WordStore::connect("sqlite::memory:", 1)
        .await
        .expect("内存词库初始化失败");
    let provider = Arc::new(StubProvider::new());
    let state = Arc::new(AppState {
        word_service: WordService::new(store, provider.clone()),
        default_target_lang: "zh".to_string(),
    });

    (create_routes().with_state(state), provider)
}
