//! Authentication for the forge API.

use crate::errors::{ForgeError, ForgeResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Authentication method for the forge API.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Access token (personal, OAuth, or CI-issued), sent as a bearer.
    Token(SecretString),
    /// Username and password, sent as HTTP basic credentials. Required by
    /// the classic authorizations (token management) routes.
    Basic {
        /// Account name.
        username: String,
        /// Account password.
        password: SecretString,
    },
    /// App authentication via a signed JWT.
    App(AppAuth),
}

impl AuthMethod {
    /// Creates a token authentication method.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(SecretString::new(token.into()))
    }

    /// Creates a basic authentication method.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Creates an app authentication method.
    pub fn app(app_id: u64, private_key_pem: impl Into<String>) -> Self {
        Self::App(AppAuth {
            app_id,
            private_key: SecretString::new(private_key_pem.into()),
        })
    }

    /// Scheme name for logging; never exposes credential material.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Token(_) => "token",
            Self::Basic { .. } => "basic",
            Self::App(_) => "app_jwt",
        }
    }
}

/// App authentication configuration.
#[derive(Debug, Clone)]
pub struct AppAuth {
    /// App ID, used as the JWT issuer.
    pub app_id: u64,
    /// Private key (PEM format, RSA).
    pub private_key: SecretString,
}

/// JWT claims for app authentication.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    /// Issued at (Unix timestamp).
    iat: i64,
    /// Expiration (Unix timestamp).
    exp: i64,
    /// Issuer (app ID).
    iss: String,
}

/// Produces `Authorization` header values for the configured method.
pub struct AuthManager {
    method: Option<AuthMethod>,
}

impl AuthManager {
    /// Creates a new authentication manager.
    pub fn new(method: Option<AuthMethod>) -> Self {
        Self { method }
    }

    /// Gets the authentication method, if any.
    pub fn method(&self) -> Option<&AuthMethod> {
        self.method.as_ref()
    }

    /// Generates the `Authorization` header value. Returns `Ok(None)` for
    /// unauthenticated clients; app JWTs are re-signed on every call.
    pub fn authorization_header(&self) -> ForgeResult<Option<String>> {
        match &self.method {
            None => Ok(None),
            Some(AuthMethod::Token(token)) => {
                Ok(Some(format!("Bearer {}", token.expose_secret())))
            }
            Some(AuthMethod::Basic { username, password }) => {
                let credentials =
                    BASE64.encode(format!("{}:{}", username, password.expose_secret()));
                Ok(Some(format!("Basic {}", credentials)))
            }
            Some(AuthMethod::App(app)) => Ok(Some(format!("Bearer {}", generate_jwt(app)?))),
        }
    }
}

/// Signs an RS256 JWT for app authentication. Issued-at is back-dated 60
/// seconds for clock drift; expiry is 9 minutes (the platform caps at 10).
fn generate_jwt(app: &AppAuth) -> ForgeResult<String> {
    let now = Utc::now();
    let claims = JwtClaims {
        iat: (now - Duration::seconds(60)).timestamp(),
        exp: (now + Duration::minutes(9)).timestamp(),
        iss: app.app_id.to_string(),
    };

    let key = EncodingKey::from_rsa_pem(app.private_key.expose_secret().as_bytes())
        .map_err(|e| ForgeError::configuration(format!("Failed to parse private key: {}", e)))?;

    let header = Header::new(Algorithm::RS256);
    encode(&header, &claims, &key)
        .map_err(|e| ForgeError::configuration(format!("Failed to sign app JWT: {}", e)))
}
