//! Listener configuration.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::error::ServerError;
use crate::types::{DEFAULT_TERM_HEIGHT, DEFAULT_TERM_WIDTH, SHUTDOWN_GRACE_SECS};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 2222;
pub const DEFAULT_TERM: &str = "xterm-256color";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How long open sessions may keep running after shutdown is requested.
    pub shutdown_grace: Duration,
    /// Terminal size assumed until the client reports its own.
    pub default_width: u16,
    pub default_height: u16,
    /// Terminal type for clients that do not report one.
    pub term: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            shutdown_grace: Duration::from_secs(SHUTDOWN_GRACE_SECS),
            default_width: DEFAULT_TERM_WIDTH,
            default_height: DEFAULT_TERM_HEIGHT,
            term: DEFAULT_TERM.to_string(),
        }
    }
}

impl ServerConfig {
    /// Create from `NIMM_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ServerConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let num = |key: &str| text(key).and_then(|s| s.parse::<u64>().ok());

        Self {
            host: text("NIMM_HOST").unwrap_or(d.host),
            port: text("NIMM_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(d.port),
            shutdown_grace: num("NIMM_SHUTDOWN_GRACE_SECS")
                .map(Duration::from_secs)
                .unwrap_or(d.shutdown_grace),
            default_width: text("NIMM_DEFAULT_WIDTH")
                .and_then(|s| s.parse().ok())
                .filter(|&w: &u16| w > 0)
                .unwrap_or(d.default_width),
            default_height: text("NIMM_DEFAULT_HEIGHT")
                .and_then(|s| s.parse().ok())
                .filter(|&h: &u16| h > 0)
                .unwrap_or(d.default_height),
            term: text("NIMM_TERM").unwrap_or(d.term),
        }
    }

    /// Resolve `host:port`. Literal IPs are used as-is; names go through
    /// the system resolver and the first address wins.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        if let Ok(ip) = self.host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.port));
        }
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "127.0.0.1:2222");
        assert_eq!(cfg.shutdown_grace, Duration::from_secs(30));
    }

    #[test]
    fn reads_every_variable() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("NIMM_HOST", "0.0.0.0"),
            ("NIMM_PORT", "2323"),
            ("NIMM_SHUTDOWN_GRACE_SECS", "5"),
            ("NIMM_DEFAULT_WIDTH", "100"),
            ("NIMM_DEFAULT_HEIGHT", "40"),
            ("NIMM_TERM", "vt100"),
        ]));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 2323);
        assert_eq!(cfg.shutdown_grace, Duration::from_secs(5));
        assert_eq!((cfg.default_width, cfg.default_height), (100, 40));
        assert_eq!(cfg.term, "vt100");
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("NIMM_PORT", "not-a-port"),
            ("NIMM_DEFAULT_WIDTH", "0"),
            ("NIMM_HOST", "  "),
        ]));
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.default_width, DEFAULT_TERM_WIDTH);
        assert_eq!(cfg.host, DEFAULT_HOST);
    }

    #[test]
    fn ipv6_literal_resolves() {
        let cfg = ServerConfig {
            host: "::1".into(),
            ..ServerConfig::default()
        };
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "[::1]:2222");
    }

    #[test]
    fn unresolvable_host_is_invalid_address() {
        let cfg = ServerConfig {
            host: "bad host name".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            cfg.socket_addr(),
            Err(ServerError::InvalidAddress(_))
        ));
    }
}
