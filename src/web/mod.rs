//! Web 服务器模块
//!
//! 暴露单词查询、列表、删除与状态四个 HTTP 接口

pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::provider::{GoogleTranslateClient, ProviderError};
use crate::storage::{StoreError, WordStore};
use crate::words::WordService;

/// Web 服务器错误
#[derive(Error, Debug)]
pub enum WebServerError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] crate::env::EnvError),

    /// 存储初始化失败
    #[error("存储初始化失败: {0}")]
    Store(#[from] StoreError),

    /// 翻译提供者初始化失败
    #[error("翻译提供者初始化失败: {0}")]
    Provider(#[from] ProviderError),

    /// 监听或请求处理失败
    #[error("服务器错误: {0}")]
    Io(#[from] std::io::Error),
}

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig) -> Self {
        Self { config }
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> Result<(), WebServerError> {
        self.config.validate()?;

        // 初始化存储
        let store = WordStore::connect(
            &self.config.database.url,
            self.config.database.max_connections,
        )
        .await?;

        // 初始化翻译提供者
        let provider =
            GoogleTranslateClient::new(&self.config.provider.api_url, self.config.provider.timeout)?;

        let app_state = Arc::new(AppState {
            word_service: WordService::new(store, Arc::new(provider)),
            default_target_lang: self.config.provider.default_target_lang.clone(),
        });

        let app = create_router(app_state);

        let listener = tokio::net::TcpListener::bind(self.config.listen_address()).await?;

        println!("Web server starting at http://{}", self.config.listen_address());

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// 创建路由器
fn create_router(app_state: Arc<AppState>) -> Router {
    let app = create_routes().with_state(app_state);

    // 添加CORS支持
    app.layer(CorsLayer::permissive())
}
