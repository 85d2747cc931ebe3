//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use std::time::Duration;

use crate::env::{EnvError, EnvResult, EnvVar};

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite 连接字符串
    pub url: String,
    /// 连接池大小
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::database;

        Ok(Self {
            url: database::Url::get()?,
            max_connections: database::MaxConnections::get()? as u32,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.url.is_empty() {
            return Err(EnvError {
                variable: "DATABASE_URL".to_string(),
                message: "Database URL cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load database config from environment: {}. Using defaults.",
                e
            );
            Self {
                url: "sqlite://wordbook.db".to_string(),
                max_connections: 5,
            }
        })
    }
}

/// 翻译提供者配置
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// 提供者接口地址
    pub api_url: String,
    /// 单次请求超时
    pub timeout: Duration,
    /// 查询未指定目标语言时的默认值
    pub default_target_lang: String,
}

impl ProviderConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::provider;

        Ok(Self {
            api_url: provider::ApiUrl::get()?,
            timeout: provider::Timeout::get()?,
            default_target_lang: provider::TargetLang::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(EnvError {
                variable: "WORDBOOK_PROVIDER_API_URL".to_string(),
                message: "API URL must start with http:// or https://".to_string(),
            });
        }

        if self.timeout.is_zero() {
            return Err(EnvError {
                variable: "WORDBOOK_PROVIDER_TIMEOUT".to_string(),
                message: "Timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load provider config from environment: {}. Using defaults.",
                e
            );
            Self {
                api_url: "https://clients5.google.com/translate_a/single".to_string(),
                timeout: Duration::from_secs(30),
                default_target_lang: "zh".to_string(),
            }
        })
    }
}

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 翻译提供者配置
    pub provider: ProviderConfig,
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::web;

        Ok(Self {
            bind_addr: web::BindAddress::get()?,
            port: web::Port::get()?,
            database: DatabaseConfig::from_env()?,
            provider: ProviderConfig::from_env()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        // 验证绑定地址
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: "WORDBOOK_WEB_BIND_ADDRESS".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        // 验证端口范围
        if self.port == 0 {
            return Err(EnvError {
                variable: "WORDBOOK_WEB_PORT".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        self.database.validate()?;
        self.provider.validate()?;

        Ok(())
    }

    /// 获取完整的监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// 检查是否为本地开发模式
    pub fn is_development(&self) -> bool {
        use crate::env::core;
        core::Mode::get()
            .map(|mode| mode == "development")
            .unwrap_or(false)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load web config from environment: {}. Using defaults.",
                e
            );
            Self {
                bind_addr: "127.0.0.1".to_string(),
                port: 8000,
                database: DatabaseConfig::default(),
                provider: ProviderConfig::default(),
            }
        })
    }
}
