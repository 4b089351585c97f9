//! Twitter API module.
//!
//! This module provides:
//! - OAuth 1.0a request signing
//! - HTTP client for the handshake and favorites endpoints
//! - API request/response types

pub mod client;
pub mod oauth;
pub mod types;

pub use client::TwitterApi;
pub use oauth::{OAuthSigner, TokenCredentials};
pub use types::*;
