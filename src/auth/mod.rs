//! Authentication module.
//!
//! Provides:
//! - Encrypted on-disk access-token storage
//! - Access-token acquisition (cached or interactive handshake)

pub mod manager;
pub mod store;

pub use manager::{AuthManager, AuthState, ConsoleVerifier, StaticVerifier, VerifierSource};
pub use store::CredentialStore;
