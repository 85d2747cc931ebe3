//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量管理，覆盖服务运行所需的全部配置项

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 应用运行模式
    pub struct Mode;
    impl EnvVar<String> for Mode {
        const NAME: &'static str = "WORDBOOK_MODE";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("production".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Application mode: development, staging, production";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "development" | "dev" => Ok("development".to_string()),
                "staging" | "stage" => Ok("staging".to_string()),
                "production" | "prod" => Ok("production".to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid mode '{}'. Use: development, staging, production", value),
                })
            }
        }
    }

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "WORDBOOK_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid log level '{}'. Use: trace, debug, info, warn, error", value),
                })
            }
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "WORDBOOK_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Web server bind address";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "WORDBOOK_WEB_PORT";
        const DEFAULT: Option<u16> = Some(8000);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port < 1024 && !is_privileged() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Ports below 1024 require root privileges".to_string(),
                });
            }

            Ok(port)
        }
    }
}

/// 数据库相关环境变量
pub mod database {
    use super::*;

    /// 数据库连接字符串
    pub struct Url;
    impl EnvVar<String> for Url {
        const NAME: &'static str = "DATABASE_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("sqlite://wordbook.db".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "SQLite connection string";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("sqlite:") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Database URL must start with sqlite:".to_string(),
                })
            }
        }
    }

    /// 连接池大小
    pub struct MaxConnections;
    impl EnvVar<usize> for MaxConnections {
        const NAME: &'static str = "WORDBOOK_DB_MAX_CONNECTIONS";
        const DEFAULT: Option<usize> = Some(5);
        const DESCRIPTION: &'static str = "Maximum database connections in the pool";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 64)
        }
    }
}

/// 翻译提供者相关环境变量
pub mod provider {
    use super::*;

    /// 翻译接口地址
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "WORDBOOK_PROVIDER_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("https://clients5.google.com/translate_a/single".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Translation provider endpoint URL";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// 请求超时
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "WORDBOOK_PROVIDER_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(30));
        const DESCRIPTION: &'static str = "Provider request timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds: u64 = value.parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of seconds".to_string(),
            })?;

            if seconds == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout must be greater than 0".to_string(),
                });
            }

            if seconds > 300 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout too long (max 300 seconds)".to_string(),
                });
            }

            Ok(Duration::from_secs(seconds))
        }
    }

    /// 默认目标语言
    pub struct TargetLang;
    impl EnvVar<String> for TargetLang {
        const NAME: &'static str = "WORDBOOK_PROVIDER_TARGET_LANG";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("zh".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Default target language for lookups (ISO 639-1 code)";

        fn parse(value: &str) -> EnvResult<String> {
            let lang = value.trim().to_lowercase();
            if lang.len() != 2 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Language code must be 2 characters (ISO 639-1)".to_string(),
                });
            }
            Ok(lang)
        }
    }
}

/// 辅助函数
fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

fn is_privileged() -> bool {
    // 简化的权限检查
    false
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    // 核心配置
    pub mode: String,
    pub log_level: String,

    // Web配置
    pub web_bind_address: String,
    pub web_port: u16,

    // 数据库配置
    pub database_url: String,
    pub database_max_connections: usize,

    // 翻译提供者配置
    pub provider_api_url: String,
    pub provider_timeout: Duration,
    pub provider_target_lang: String,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            // 核心配置
            mode: core::Mode::get()?,
            log_level: core::LogLevel::get()?,

            // Web配置
            web_bind_address: web::BindAddress::get()?,
            web_port: web::Port::get()?,

            // 数据库配置
            database_url: database::Url::get()?,
            database_max_connections: database::MaxConnections::get()?,

            // 翻译提供者配置
            provider_api_url: provider::ApiUrl::get()?,
            provider_timeout: provider::Timeout::get()?,
            provider_target_lang: provider::TargetLang::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        // 可以添加跨字段验证逻辑
        Ok(())
    }

    /// 打印配置摘要
    pub fn print_summary(&self) {
        println!("Environment Configuration Summary:");
        println!("  Mode: {}", self.mode);
        println!("  Log Level: {}", self.log_level);
        println!("  Web Server: {}:{}", self.web_bind_address, self.web_port);
        println!("  Database: {}", self.database_url);
        println!("  Provider: {}", self.provider_api_url);
        println!("  Default Target Language: {}", self.provider_target_lang);
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    // 核心变量
    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        core::Mode::NAME, core::Mode::DESCRIPTION, core::Mode::DEFAULT));
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        core::LogLevel::NAME, core::LogLevel::DESCRIPTION, core::LogLevel::DEFAULT));

    // Web变量
    docs.push_str("\n## Web Server Configuration\n\n");
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        web::BindAddress::NAME, web::BindAddress::DESCRIPTION, web::BindAddress::DEFAULT));
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        web::Port::NAME, web::Port::DESCRIPTION, web::Port::DEFAULT));

    // 数据库变量
    docs.push_str("\n## Database Configuration\n\n");
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        database::Url::NAME, database::Url::DESCRIPTION, database::Url::DEFAULT));
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        database::MaxConnections::NAME, database::MaxConnections::DESCRIPTION, database::MaxConnections::DEFAULT));

    // 翻译提供者变量
    docs.push_str("\n## Provider Configuration\n\n");
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        provider::ApiUrl::NAME, provider::ApiUrl::DESCRIPTION, provider::ApiUrl::DEFAULT));
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        provider::Timeout::NAME, provider::Timeout::DESCRIPTION, provider::Timeout::DEFAULT));
    docs.push_str(&format!("- `{}`: {} (default: {:?})\n",
        provider::TargetLang::NAME, provider::TargetLang::DESCRIPTION, provider::TargetLang::DEFAULT));

    docs
}
