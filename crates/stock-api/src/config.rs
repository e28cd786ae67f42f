//! Server configuration

use clap::Parser;

/// HTTP server settings, from flags or the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "stock-api")]
#[command(about = "Stock analysis HTTP API", version, long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log one JSON object per line
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["stock-api"]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr(), format!("{}:8000", config.host));
    }

    #[test]
    fn test_flags() {
        let config =
            ServerConfig::try_parse_from(["stock-api", "--host", "127.0.0.1", "--port", "9000", "--log-json"])
                .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert!(config.log_json);
    }
}
