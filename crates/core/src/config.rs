//! Client configuration from environment variables.

use std::time::Duration;

/// Contract address used when `SPONSORBOOK_CONTRACT_ADDRESS` is not set.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xef48eb47752dcd2d7bb8fb2c2889ae11a4ca39df";

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the sponsorbook client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Wallet JSON-RPC endpoint URL; empty means no provider is available.
    pub rpc_url: String,
    /// Address of the sponsorship contract.
    pub contract_address: String,
    /// HTTP request timeout.
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Reads `SPONSORBOOK_RPC_URL`, `SPONSORBOOK_CONTRACT_ADDRESS` and
    /// `SPONSORBOOK_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SPONSORBOOK_RPC_URL") {
            if !url.trim().is_empty() {
                config.rpc_url = url.trim().to_string();
            }
        }
        if let Ok(addr) = std::env::var("SPONSORBOOK_CONTRACT_ADDRESS") {
            if !addr.trim().is_empty() {
                config.contract_address = addr.trim().to_string();
            }
        }
        if let Ok(secs) = std::env::var("SPONSORBOOK_HTTP_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(v) => config.http_timeout = Duration::from_secs(v),
                Err(_) => tracing::warn!(
                    value = %secs,
                    "SPONSORBOOK_HTTP_TIMEOUT_SECS is not a number, keeping default"
                ),
            }
        }

        config
    }

    /// Whether a wallet provider endpoint is available.  Connecting without
    /// one fails with a user-visible "provider missing" error.
    pub fn is_provider_configured(&self) -> bool {
        !self.rpc_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(!config.is_provider_configured());
        assert_eq!(config.contract_address, DEFAULT_CONTRACT_ADDRESS);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_provider_configured_with_url() {
        let config = ClientConfig {
            rpc_url: "http://localhost:8545".into(),
            ..ClientConfig::default()
        };
        assert!(config.is_provider_configured());
    }
}
