//! OAuth 1.0a request signing.
//!
//! The signer is the only holder of the application key and secret. It is
//! built once per run and passed by reference to everything that talks to
//! the API.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use sha1::Sha1;

use crate::error::{Error, Result};

/// RFC 3986 unreserved characters stay as-is, everything else is encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A token/secret pair used as the second half of the signing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCredentials {
    pub key: String,
    pub secret: String,
}

/// OAuth 1.0a HMAC-SHA1 signing context.
#[derive(Clone)]
pub struct OAuthSigner {
    consumer_key: String,
    consumer_secret: String,
}

impl std::fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("consumer_key", &self.consumer_key)
            .finish_non_exhaustive()
    }
}

impl OAuthSigner {
    /// Create a signer from the application key and secret.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// `url` must not carry a query string; query and body parameters go in
    /// `params`. Parameters whose name starts with `oauth_` (for example
    /// `oauth_callback` or `oauth_verifier`) are signed and emitted in the
    /// header instead of the query.
    pub fn sign(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        token: Option<&TokenCredentials>,
    ) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.sign_with(method, url, params, token, &timestamp, &generate_nonce())
    }

    fn sign_with(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
        token: Option<&TokenCredentials>,
        timestamp: &str,
        nonce: &str,
    ) -> Result<String> {
        let mut oauth_params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
        ];
        if let Some(token) = token {
            oauth_params.push(("oauth_token".to_string(), token.key.clone()));
        }
        oauth_params.push(("oauth_version".to_string(), "1.0".to_string()));
        oauth_params.extend(
            params
                .iter()
                .filter(|(k, _)| k.starts_with("oauth_"))
                .cloned(),
        );

        let mut all_params: Vec<(String, String)> = oauth_params
            .iter()
            .chain(params.iter().filter(|(k, _)| !k.starts_with("oauth_")))
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        all_params.sort();

        let param_string = all_params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let base_string = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            percent_encode(url),
            percent_encode(&param_string)
        );

        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.consumer_secret),
            token.map(|t| percent_encode(&t.secret)).unwrap_or_default()
        );

        let signature = hmac_sha1(&signing_key, &base_string)?;
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let header = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", header))
    }
}

/// Percent-encode a string according to RFC 3986.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hmac_sha1(key: &str, data: &str) -> Result<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| Error::Authentication(format!("Invalid signing key: {}", e)))?;
    mac.update(data.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
