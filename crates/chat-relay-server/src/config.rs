//! Command line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

#[derive(Parser, Debug, Clone)]
#[command(name = "chat-relay")]
#[command(author, version, about = "Point-to-point WebSocket chat relay")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "CHAT_RELAY_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Log filter directive (overridden by RUST_LOG)
    #[arg(long, env = "CHAT_RELAY_LOG", default_value = "info")]
    pub log_filter: String,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to (port 0 picks a free port).
    pub listen: SocketAddr,
    /// Tracing filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_filter: "info".to_string(),
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            listen: args.listen,
            log_filter: args.log_filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_cli_default() {
        let args = Args::try_parse_from(["chat-relay"]).unwrap();
        assert_eq!(
            args.listen,
            DEFAULT_LISTEN.parse::<SocketAddr>().unwrap()
        );
        // Only compare the listen address; the env may set a log filter.
        assert_eq!(ServerConfig::from(args).listen, ServerConfig::default().listen);
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "chat-relay",
            "--listen",
            "127.0.0.1:9000",
            "--log-filter",
            "debug,tower_http=info",
        ])
        .unwrap();
        let config = ServerConfig::from(args);
        assert_eq!(config.listen, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(config.log_filter, "debug,tower_http=info");
    }

    #[test]
    fn test_rejects_bad_address() {
        assert!(Args::try_parse_from(["chat-relay", "--listen", "not-an-address"]).is_err());
    }
}
