//! 单词列表集成测试
//!
//! 覆盖分页窗口、过滤计数口径与翻译内容携带开关

mod common {
    include!("common/mod.rs");
}

use common::TestEnvironment;

/// 依次录入一批单词，id 按录入顺序递增
async fn seed_words(env: &TestEnvironment, words: &[&str]) {
    for word in words {
        env.provider.add_translation(word, "zh", "en");
        env.service
            .lookup(word, "zh")
            .await
            .expect("录入测试单词失败");
    }
}

/// 测试分页窗口与总数口径
#[tokio::test]
async fn test_pagination_window_and_total() {
    let env = TestEnvironment::new().await;
    seed_words(&env, &["apple", "banana", "cherry", "date", "elder"]).await;

    let page = env.service.list(1, 2, false, None).await.unwrap();

    assert_eq!(page.total_count, 5, "Total must count all matches, not the page");
    assert_eq!(page.words.len(), 2);
    assert_eq!(page.words[0].word.word, "banana");
    assert_eq!(page.words[1].word.word, "cherry");
    assert!(page.words.iter().all(|w| w.translations.is_none()),
            "Translations must stay omitted unless requested");

    println!("✅ Pagination returned window of 2 out of {}", page.total_count);
}

/// 测试超出范围的分页窗口返回空页
#[tokio::test]
async fn test_page_beyond_range_is_empty() {
    let env = TestEnvironment::new().await;
    seed_words(&env, &["apple", "banana"]).await;

    let page = env.service.list(10, 5, false, None).await.unwrap();

    assert_eq!(page.total_count, 2);
    assert!(page.words.is_empty(), "Out-of-range page should be empty");

    println!("✅ Out-of-range page empty with total {}", page.total_count);
}

/// 测试子串过滤在分页之前计数
#[tokio::test]
async fn test_word_filter_counts_before_pagination() {
    let env = TestEnvironment::new().await;
    seed_words(&env, &["challenge", "chalk", "chair", "banana"]).await;

    let page = env.service.list(0, 1, false, Some("chal")).await.unwrap();

    assert_eq!(page.total_count, 2, "Filter total must ignore the page size");
    assert_eq!(page.words.len(), 1);
    assert_eq!(page.words[0].word.word, "challenge");

    println!("✅ Filter matched {} words, page holds {}", page.total_count, page.words.len());
}

/// 测试过滤对大小写不敏感
#[tokio::test]
async fn test_word_filter_is_case_insensitive() {
    let env = TestEnvironment::new().await;
    seed_words(&env, &["challenge", "chalk", "banana"]).await;

    let upper = env.service.list(0, 10, false, Some("CHAL")).await.unwrap();
    let lower = env.service.list(0, 10, false, Some("chal")).await.unwrap();

    assert_eq!(upper.total_count, 2);
    assert_eq!(upper.total_count, lower.total_count);
    assert_eq!(upper.words.len(), 2);

    println!("✅ Case-insensitive filter matched {} words", upper.total_count);
}

/// 测试无匹配的过滤返回零总数
#[tokio::test]
async fn test_word_filter_without_matches() {
    let env = TestEnvironment::new().await;
    seed_words(&env, &["apple", "banana"]).await;

    let page = env.service.list(0, 10, false, Some("zzz")).await.unwrap();

    assert_eq!(page.total_count, 0);
    assert!(page.words.is_empty());

    println!("✅ Unmatched filter yielded an empty result");
}

/// 测试请求携带翻译时返回完整内容
#[tokio::test]
async fn test_include_translations_embeds_content() {
    let env = TestEnvironment::new().await;
    seed_words(&env, &["apple", "banana"]).await;
    env.provider.add_translation("apple", "pt", "en");
    env.service.lookup("apple", "pt").await.unwrap();

    let page = env.service.list(0, 10, true, None).await.unwrap();

    assert_eq!(page.total_count, 2);
    assert_eq!(page.words.len(), 2);

    let apple = page
        .words
        .iter()
        .find(|w| w.word.word == "apple")
        .expect("apple should be listed");
    let translations = apple.translations.as_ref().expect("翻译内容应该被携带");
    assert_eq!(translations.len(), 2);
    assert!(translations.iter().any(|t| t.src == "zh"));
    assert!(translations.iter().any(|t| t.src == "pt"));

    let banana = page
        .words
        .iter()
        .find(|w| w.word.word == "banana")
        .expect("banana should be listed");
    assert_eq!(banana.translations.as_ref().unwrap().len(), 1);

    println!("✅ Listing embedded translations for {} words", page.words.len());
}
