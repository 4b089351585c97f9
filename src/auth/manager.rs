//! Access-token acquisition.
//!
//! A cached token is used when present. Otherwise the three-legged handshake
//! runs: request token, operator approval in a browser, access token.

use std::path::Path;

use console::Term;

use crate::api::types::{AccessToken, RequestToken};
use crate::api::TwitterApi;
use crate::auth::store::CredentialStore;
use crate::error::{Error, Result};
use crate::fs::paths::expect_regular_file;
use crate::output::print_info;

/// Supplies the PIN the operator receives after approving the app.
///
/// Implementations block until the verifier is available.
pub trait VerifierSource {
    fn obtain_verifier(&self, authorize_url: &str) -> Result<String>;
}

/// Reads the verifier from the terminal.
#[derive(Debug, Default)]
pub struct ConsoleVerifier;

impl VerifierSource for ConsoleVerifier {
    fn obtain_verifier(&self, _authorize_url: &str) -> Result<String> {
        let term = Term::stdout();
        term.write_str("Paste the PIN here: ")?;
        Ok(term.read_line()?)
    }
}

/// A fixed verifier, for non-interactive runs.
#[derive(Debug, Clone)]
pub struct StaticVerifier(pub String);

impl VerifierSource for StaticVerifier {
    fn obtain_verifier(&self, _authorize_url: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Where the manager is in the credential lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    NoCredential,
    HandshakePending(RequestToken),
    Authenticated(AccessToken),
}

/// Obtains an access token from cache or via the handshake.
pub struct AuthManager<'a, V: VerifierSource + ?Sized> {
    api: &'a TwitterApi,
    store: &'a CredentialStore,
    verifier: &'a V,
    state: AuthState,
}

impl<'a, V: VerifierSource + ?Sized> AuthManager<'a, V> {
    pub fn new(api: &'a TwitterApi, store: &'a CredentialStore, verifier: &'a V) -> Self {
        Self {
            api,
            store,
            verifier,
            state: AuthState::NoCredential,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Return a usable access token, running the handshake if `path` is absent.
    ///
    /// A directory at `path` or an undecryptable file is fatal; neither
    /// triggers a new handshake.
    pub async fn ensure_token(&mut self, path: &Path) -> Result<AccessToken> {
        if let AuthState::Authenticated(token) = &self.state {
            return Ok(token.clone());
        }

        if expect_regular_file(path).await? {
            let token = self.store.load(path).await?;
            tracing::info!("Retrieved cached access token for @{}", token.handle);
            self.state = AuthState::Authenticated(token.clone());
            return Ok(token);
        }

        tracing::info!(
            "No cached access token at {}, starting authorization",
            path.display()
        );

        let request_token = self.api.request_token().await?;
        if !request_token.callback_confirmed {
            tracing::warn!("Request token callback was not confirmed");
        }
        self.state = AuthState::HandshakePending(request_token.clone());

        let url = self.api.authorize_url(&request_token)?;
        print_info(&format!("Please go here and authorize: {}", url));

        let verifier = self.verifier.obtain_verifier(&url)?;
        let verifier = verifier.trim();
        if verifier.is_empty() {
            return Err(Error::Authentication("No verifier PIN entered".into()));
        }

        let token = self.api.access_token(&request_token, verifier).await?;
        self.store.save(path, &token).await?;
        tracing::info!("Authorized as @{}, access token cached", token.handle);

        self.state = AuthState::Authenticated(token.clone());
        Ok(token)
    }
}
