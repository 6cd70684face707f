//! # forgekit
//!
//! A typed async client for GitHub-compatible code-forge REST APIs:
//! - Repositories, issues, milestones, pull requests, organizations, teams,
//!   projects, workflows, activity, hooks, authorizations, and users
//! - Deterministic pagination: bounded page windows and follow-to-exhaustion
//! - Token, basic, and app (signed JWT) authentication
//! - Webhook signature computation and verification
//! - Fixture helpers for integration suites (scoped temp repositories,
//!   eventual-consistency polling)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use forgekit::{AuthMethod, ForgeClient, ForgeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ForgeConfig::builder()
//!         .auth(AuthMethod::token("tok_xxxxxxxxxxxx"))
//!         .build()?;
//!
//!     let client = ForgeClient::new(config)?;
//!
//!     let repos = client.repositories().list_for_user("octocat", &Default::default()).await?;
//!     for repo in repos {
//!         println!("{}", repo.full_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod types;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;

// Pagination handling
pub mod pagination;

// API Services
pub mod services;

// Webhooks
pub mod webhooks;

// Integration-suite helpers
pub mod testkit;

// Re-exports for convenience
pub use auth::{AuthMethod, AuthManager};
pub use client::{ForgeClient, ForgeClientBuilder};
pub use config::{Capabilities, ForgeConfig, ForgeConfigBuilder, SecretSealer};
pub use errors::{FieldError, ForgeError, ForgeErrorKind, ForgeResult, RateLimitInfo};
pub use pagination::{Page, PageLinks, PageRequest};
pub use types::*;
