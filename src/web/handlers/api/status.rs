//! 服务状态处理器

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};

use crate::web::types::{AppState, StatusResponse};

/// 获取服务状态
///
/// 附带词库规模统计，统计查询失败即视为数据库不可用
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<serde_json::Value>)> {
    match state.word_service.stats().await {
        Ok(stats) => Ok(Json(StatusResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION"),
            database: "connected".to_string(),
            words: stats.words,
            translations: stats.translations,
        })),
        Err(e) => {
            tracing::error!("获取服务状态失败: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "error": true,
                    "message": format!("数据库服务不可用: {}", e)
                })),
            ))
        }
    }
}
