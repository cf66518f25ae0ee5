use dotenvy::dotenv;
use http::HeaderValue;
use std::{env, net::SocketAddr, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number, got {0:?}")]
    Port(String),
    #[error("invalid host or port: {0}")]
    Addr(String),
    #[error("CORS_ORIGIN is not a valid header value: {0:?}")]
    CorsOrigin(String),
    #[error("LOG_LEVEL must be one of trace, debug, info, warn, error; got {0:?}")]
    LogLevel(String),
}

/// Settings for the upstream chat-completion API.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub projects_dir: PathBuf,
    pub database_url: String,
    pub frontend_dir: Option<PathBuf>,
    pub cors_origin: HeaderValue,
    pub log_level: tracing::Level,
    pub chat: ChatConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let chat_defaults = ChatConfig::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: port.parse().map_err(|_| ConfigError::Port(port))?,
            projects_dir: env::var("PROJECTS_DIR")
                .unwrap_or_else(|_| "./projects".to_string())
                .into(),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://local.db".to_string()),
            frontend_dir: env::var("FRONTEND_DIR").ok().map(PathBuf::from),
            cors_origin: HeaderValue::from_str(&cors_origin)
                .map_err(|_| ConfigError::CorsOrigin(cors_origin))?,
            log_level: log_level
                .parse()
                .map_err(|_| ConfigError::LogLevel(log_level))?,
            chat: ChatConfig {
                api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
                base_url: env::var("OPENAI_BASE_URL").unwrap_or(chat_defaults.base_url),
                model: env::var("OPENAI_MODEL").unwrap_or(chat_defaults.model),
            },
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Addr(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> AppConfig {
        AppConfig {
            host: host.to_string(),
            port: 5000,
            projects_dir: "./projects".into(),
            database_url: "sqlite::memory:".to_string(),
            frontend_dir: None,
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            log_level: tracing::Level::INFO,
            chat: ChatConfig::default(),
        }
    }

    #[test]
    fn socket_addr_joins_host_and_port() {
        let addr = config("127.0.0.1").socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn socket_addr_rejects_hostnames() {
        assert!(matches!(
            config("not a host").socket_addr(),
            Err(ConfigError::Addr(_))
        ));
    }

    #[test]
    fn chat_defaults_target_openai() {
        let chat = ChatConfig::default();
        assert!(chat.api_key.is_none());
        assert_eq!(chat.model, "gpt-4o-mini");
    }
}
