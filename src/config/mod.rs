use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub max_body_bytes: usize,
    /// Optional JSON file replacing the built-in survey taxonomies.
    pub taxonomy_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| "65536".to_string())
                .parse()
                .unwrap_or(65536),
            taxonomy_path: env::var("TAXONOMY_PATH").ok().filter(|p| !p.is_empty()),
        })
    }

    /// Socket address string the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = AppConfig {
            database_url: "postgres://localhost/surveydash".to_string(),
            database_max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 8080,
            frontend_url: "http://localhost:3000".to_string(),
            max_body_bytes: 1024,
            taxonomy_path: None,
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
