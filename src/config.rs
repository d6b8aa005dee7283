//! アプリケーション設定
//!
//! 既定値 → `LIBRARY__` で始まる環境変数 → `DATABASE_URL` / `PORT` の順に上書きする。
//! `.env`ファイルがあれば先に読み込む。

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter`の書式。`RUST_LOG`が設定されていればそちらを優先する。
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 環境から設定を読み込む
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(Environment::with_prefix("LIBRARY").separator("__").try_parsing(true))
            .and_then(|builder| {
                builder
                    .set_override_option("database.url", env::var("DATABASE_URL").ok())?
                    .set_override_option("server.port", env::var("PORT").ok())?
                    .build()?
                    .try_deserialize()
            })
    }

    /// 既定値に任意のソースを重ねたビルダーを作る
    fn from_source(
        source: Environment,
    ) -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "postgres://localhost/library")?
            .set_default("database.max_connections", 5)?
            .set_default(
                "logging.filter",
                "rusty_library_circulation=debug,tower_http=debug",
            )?
            .add_source(source))
    }

    /// サーバーの待ち受けアドレス
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
