//! Google 词典接口客户端
//!
//! 调用 clients5.google.com 的词典接口获取单词翻译，
//! 并把松散的响应结构规范化为 [`FetchedTranslation`]。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use url::Url;

use super::{FetchedTranslation, ProviderError, TranslationProvider};

/// Google 词典响应中实际使用的字段
///
/// 响应还携带大量未使用的字段（ld_result 等），反序列化时忽略。
#[derive(Debug, Deserialize)]
struct GoogleDictPayload {
    src: String,
    sentences: Vec<serde_json::Value>,
    #[serde(rename = "dict")]
    dict_entries: Option<Vec<serde_json::Value>>,
}

/// 基于 Google 词典接口的翻译提供者
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl GoogleTranslateClient {
    /// 创建客户端
    ///
    /// Google 的接口在无 Cookie 时会对部分地区返回同意页，
    /// 因此所有请求都携带 `CONSENT=YES+`。
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(api_url)
            .map_err(|e| ProviderError::InvalidEndpoint(format!("{}: {}", api_url, e)))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            header::HeaderValue::from_static("CONSENT=YES+"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn request_url(&self, word: &str, target_lang: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("dj", "1")
            .append_pair("dt", "t")
            .append_pair("dt", "sp")
            .append_pair("dt", "ld")
            .append_pair("dt", "bd")
            .append_pair("client", "dict-chrome-ex")
            .append_pair("sl", "auto")
            .append_pair("tl", target_lang)
            .append_pair("q", word);
        url
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateClient {
    async fn fetch_translation(
        &self,
        word: &str,
        target_lang: &str,
    ) -> Result<FetchedTranslation, ProviderError> {
        let url = self.request_url(word, target_lang);

        tracing::debug!("请求翻译接口: word={}, target_lang={}", word, target_lang);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let payload: serde_json::Value = response.json().await?;

        normalize_payload(target_lang, payload)
    }

    fn name(&self) -> &str {
        "google-translate"
    }
}

/// 把 Google 词典响应归一化为内部结构
///
/// 检测出的源语言挪到 `origin_language`，`src` 改写为本次查询的目标语言，
/// `dict` 改名为 `data`；`dict` 缺失时 `data` 为 None 而不是报错。
fn normalize_payload(
    target_lang: &str,
    payload: serde_json::Value,
) -> Result<FetchedTranslation, ProviderError> {
    let payload: GoogleDictPayload = serde_json::from_value(payload)
        .map_err(|e| ProviderError::Parse(format!("响应结构不符合预期: {}", e)))?;

    Ok(FetchedTranslation {
        origin_language: payload.src,
        src: target_lang.to_string(),
        sentences: payload.sentences,
        data: payload.dict_entries,
    })
}
