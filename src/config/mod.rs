//! Configuration types for the forge client.

use crate::auth::AuthMethod;
use crate::errors::{ForgeError, ForgeResult};
use crate::types::SecretsPublicKey;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default API base URL (the canonical public instance).
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default API version header value (date-based).
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "forgekit/0.1.0";

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 20,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

/// Seals secret plaintext against a repository public key before upload.
///
/// The platform's sealed-box primitive is deliberately not bundled;
/// registering an implementation enables the secret-sealing capability on
/// the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretSealer: Send + Sync {
    /// Encrypts `plaintext` against `key`, returning the base64 ciphertext.
    async fn seal(&self, key: &SecretsPublicKey, plaintext: &[u8]) -> ForgeResult<String>;
}

/// Runtime capability flags, checked by guarded operations.
#[derive(Clone, Default)]
pub struct Capabilities {
    secret_sealer: Option<Arc<dyn SecretSealer>>,
}

impl Capabilities {
    /// Creates an empty capability set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a secret sealer, enabling the secret-sealing capability.
    pub fn with_secret_sealer(mut self, sealer: Arc<dyn SecretSealer>) -> Self {
        self.secret_sealer = Some(sealer);
        self
    }

    /// Returns true when secret sealing is supported.
    pub fn secret_sealing(&self) -> bool {
        self.secret_sealer.is_some()
    }

    /// Returns the registered sealer, if any.
    pub fn secret_sealer(&self) -> Option<Arc<dyn SecretSealer>> {
        self.secret_sealer.clone()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("secret_sealing", &self.secret_sealing())
            .finish()
    }
}

/// Forge client configuration.
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    /// API base URL.
    pub base_url: String,
    /// API version header.
    pub api_version: String,
    /// Authentication method.
    pub auth: Option<AuthMethod>,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Connection pool configuration.
    pub pool: PoolConfig,
    /// Runtime capabilities.
    pub capabilities: Capabilities,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pool: PoolConfig::default(),
            capabilities: Capabilities::default(),
        }
    }
}

impl ForgeConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ForgeConfigBuilder {
        ForgeConfigBuilder::new()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.base_url.is_empty() {
            return Err(ForgeError::configuration("Base URL cannot be empty"));
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| ForgeError::configuration(format!("Invalid base URL: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ForgeError::configuration(
                "Base URL must use http or https",
            ));
        }

        if self.user_agent.is_empty() {
            return Err(ForgeError::configuration(
                "User-Agent is required by the API",
            ));
        }

        Ok(())
    }
}

/// Builder for ForgeConfig.
#[derive(Default)]
pub struct ForgeConfigBuilder {
    base_url: Option<String>,
    api_version: Option<String>,
    auth: Option<AuthMethod>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    pool: Option<PoolConfig>,
    capabilities: Option<Capabilities>,
}

impl ForgeConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the connection pool configuration.
    pub fn pool(mut self, config: PoolConfig) -> Self {
        self.pool = Some(config);
        self
    }

    /// Sets the capability set.
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Registers a secret sealer on the capability set.
    pub fn secret_sealer(mut self, sealer: Arc<dyn SecretSealer>) -> Self {
        let capabilities = self.capabilities.take().unwrap_or_default();
        self.capabilities = Some(capabilities.with_secret_sealer(sealer));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ForgeResult<ForgeConfig> {
        let config = ForgeConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            auth: self.auth,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            pool: self.pool.unwrap_or_default(),
            capabilities: self.capabilities.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
