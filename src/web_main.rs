//! Web 服务器主程序入口

use wordbook::env::EnvConfig;
use wordbook::web::{WebConfig, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载 .env 文件，不存在时静默跳过
    dotenv::dotenv().ok();

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();

    let mut bind_override: Option<String> = None;
    let mut port_override: Option<u16> = None;

    // 简单的命令行参数解析
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_override = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    let port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    port_override = Some(port);
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--env-help" => {
                print!("{}", wordbook::env::generate_env_docs());
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 初始化日志
    let env_config = EnvConfig::from_env()?;
    env_config.validate()?;
    init_tracing(&env_config.log_level);

    if env_config.mode == "development" {
        env_config.print_summary();
    }

    // 创建 Web 配置，命令行参数优先于环境变量
    let mut web_config = WebConfig::from_env()?;
    if let Some(bind_addr) = bind_override {
        web_config.bind_addr = bind_addr;
    }
    if let Some(port) = port_override {
        web_config.port = port;
    }

    // 启动 Web 服务器
    let server = WebServer::new(web_config);
    server.start().await?;

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level: tracing::Level = log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn print_help() {
    println!("Wordbook Web Server");
    println!();
    println!("USAGE:");
    println!("    wordbook-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>        Port number [default: 8000]");
    println!("        --env-help           Print environment variable documentation");
    println!("    -h, --help               Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    wordbook-web");
    println!("    wordbook-web --bind 0.0.0.0 --port 3000");
}
