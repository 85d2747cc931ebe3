//! 单词API处理器
//!
//! 覆盖查询、列表、删除三个端点。错误响应统一为
//! `{"error": true, "message": ...}`，状态码区分"查无此词"与"提供者不可用"。

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::web::types::{
    AppState, DeleteResponse, ListParams, LookupParams, PaginatedWords, WordResponse, WordSummary,
};
use crate::words::LookupError;

/// 单词查询端点
///
/// 命中缓存直接返回；未命中时经提供者取数并入库后返回完整记录
pub async fn lookup_word(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
    Query(params): Query<LookupParams>,
) -> Result<Json<WordResponse>, (StatusCode, Json<serde_json::Value>)> {
    let target_lang = params
        .translated_language
        .unwrap_or_else(|| state.default_target_lang.clone());

    tracing::info!("查询单词: {} -> {}", word, target_lang);

    match state.word_service.lookup(&word, &target_lang).await {
        Ok(record) => Ok(Json(WordResponse::from(record))),
        Err(LookupError::WordNotFound(w)) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": true,
                "message": format!("未找到单词: {}", w)
            })),
        )),
        Err(LookupError::ProviderUnavailable(e)) => {
            tracing::error!("翻译提供者不可用: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": true,
                    "message": format!("翻译提供者不可用: {}", e)
                })),
            ))
        }
        Err(LookupError::Store(e)) => {
            tracing::error!("查询单词失败: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": true,
                    "message": format!("查询单词失败: {}", e)
                })),
            ))
        }
    }
}

/// 单词列表端点
///
/// 总数先于分页计算；`include_translations` 同时决定候选范围和响应形态
pub async fn list_words(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedWords>, (StatusCode, Json<serde_json::Value>)> {
    let skip = params.skip.unwrap_or(0).max(0);
    let limit = params.limit.unwrap_or(10).max(0);
    let include_translations = params.include_translations.unwrap_or(false);
    let word_filter = params.word_filter.unwrap_or_default();

    match state
        .word_service
        .list(skip, limit, include_translations, Some(word_filter.as_str()))
        .await
    {
        Ok(page) => Ok(Json(PaginatedWords {
            total_count: page.total_count,
            words: page.words.into_iter().map(WordSummary::from).collect(),
        })),
        Err(e) => {
            tracing::error!("获取单词列表失败: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": true,
                    "message": format!("获取单词列表失败: {}", e)
                })),
            ))
        }
    }
}

/// 单词删除端点
///
/// 目标不存在不算错误，返回与删除成功同构的消息体
pub async fn delete_word(
    State(state): State<Arc<AppState>>,
    Path(word_id): Path<String>,
) -> Result<Json<DeleteResponse>, (StatusCode, Json<serde_json::Value>)> {
    let word_id: i64 = match word_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": true,
                    "message": format!("无效的单词ID: {}", word_id)
                })),
            ));
        }
    };

    match state.word_service.delete(word_id).await {
        Ok(true) => Ok(Json(DeleteResponse {
            message: "Word deleted successfully".to_string(),
        })),
        Ok(false) => Ok(Json(DeleteResponse {
            message: "Word not found".to_string(),
        })),
        Err(e) => {
            tracing::error!("删除单词失败: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": true,
                    "message": format!("删除单词失败: {}", e)
                })),
            ))
        }
    }
}
