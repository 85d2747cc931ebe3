//! Web 路由定义

use axum::{routing::get, Router};

use crate::web::{handlers::*, types::AppState};
use std::sync::Arc;

/// 创建路由结构
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // 单词查询与删除共用同一个路径参数
        .route("/word/:word", get(lookup_word).delete(delete_word))
        .route("/words", get(list_words))
        // 管理接口
        .route("/api/status", get(get_status))
}
