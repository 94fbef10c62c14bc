//! Client configuration

/// Configuration for connecting to the store server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// WebSocket base URL; derived from `base_url` when unset
    pub ws_url: Option<String>,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration pointing at a REST base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ws_url: None,
            token: None,
            timeout: 30,
        }
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Override the WebSocket base URL
    ///
    /// Needed only when the push channels are served from a different
    /// host than the REST API.
    pub fn with_ws_url(mut self, ws_url: impl Into<String>) -> Self {
        self.ws_url = Some(ws_url.into());
        self
    }

    /// WebSocket base URL, deriving `ws(s)://` from `base_url` when no
    /// explicit override is configured
    pub fn ws_base(&self) -> String {
        if let Some(ws) = &self.ws_url {
            return ws.trim_end_matches('/').to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            base.to_string()
        }
    }

    /// Create an API client from this configuration
    pub fn build_api_client(&self) -> super::ApiClient {
        super::ApiClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain() {
        let config = ClientConfig::new("https://tienda.example.com")
            .with_token("jwt")
            .with_timeout(5);
        assert_eq!(config.base_url, "https://tienda.example.com");
        assert_eq!(config.token.as_deref(), Some("jwt"));
        assert_eq!(config.timeout, 5);
    }

    #[test]
    fn ws_base_derived_from_http_scheme() {
        assert_eq!(
            ClientConfig::new("http://localhost:8000/").ws_base(),
            "ws://localhost:8000"
        );
        assert_eq!(
            ClientConfig::new("https://tienda.example.com").ws_base(),
            "wss://tienda.example.com"
        );
    }

    #[test]
    fn ws_base_override_wins() {
        let config =
            ClientConfig::new("https://tienda.example.com").with_ws_url("wss://push.example.com/");
        assert_eq!(config.ws_base(), "wss://push.example.com");
    }
}
