use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env_var("DATABASE_HOST")?,
            port: env_var("DATABASE_PORT")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: env_var("DATABASE_USERNAME")?,
            password: env_var("DATABASE_PASSWORD")?,
            database: env_var("DATABASE_NAME")?,
        };
        let auth = AuthConfig {
            ttl: env_var("AUTH_TOKEN_TTL")?
                .parse()
                .context("AUTH_TOKEN_TTL must be a number of seconds")?,
            secret: env_var("AUTH_TOKEN_SECRET")?,
        };
        let server = ServerConfig {
            port: match std::env::var("SERVER_PORT") {
                Ok(port) => port.parse().context("SERVER_PORT must be a port number")?,
                Err(_) => 8080,
            },
        };
        Ok(Self {
            database,
            auth,
            server,
        })
    }
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("environment variable {name} is not set"))
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    /// アクセストークンの有効期間（秒）
    pub ttl: u64,
    /// JWT の署名鍵
    pub secret: String,
}

pub struct ServerConfig {
    pub port: u16,
}
