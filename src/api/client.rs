//! Twitter REST API client.

use reqwest::{header, Client, Response, StatusCode};
use url::Url;

use crate::api::oauth::{OAuthSigner, TokenCredentials};
use crate::api::types::*;
use crate::config::ApiConfig;
use crate::error::{Error, Result};

const REQUEST_TOKEN_PATH: &str = "/oauth/request_token";
const AUTHORIZE_PATH: &str = "/oauth/authorize";
const ACCESS_TOKEN_PATH: &str = "/oauth/access_token";
const FAVORITES_PATH: &str = "/1.1/favorites/list.json";

/// API client holding the HTTP connection pool and the signing context.
#[derive(Debug)]
pub struct TwitterApi {
    client: Client,
    signer: OAuthSigner,
    api_base: String,
    oauth_base: String,
}

impl TwitterApi {
    /// Create a new API client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("likes-exporter/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            signer: OAuthSigner::new(&config.consumer_key, &config.consumer_secret),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            oauth_base: config.oauth_base.trim_end_matches('/').to_string(),
        })
    }

    /// Signed POST to one of the handshake endpoints, returning the form body.
    async fn post_oauth(
        &self,
        path: &str,
        params: &[(String, String)],
        token: Option<&TokenCredentials>,
    ) -> Result<String> {
        let url = format!("{}{}", self.oauth_base, path);
        let auth = self.signer.sign("POST", &url, params, token)?;

        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| Error::Authentication(format!("POST {} failed: {}", path, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Authentication(format!("Failed to read {}: {}", path, e)))?;
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            tracing::error!("Handshake error response: {}", body);
            return Err(Error::Authentication(format!(
                "HTTP {} from {}: {}",
                status,
                path,
                if body.is_empty() { "empty body" } else { &body }
            )));
        }
        if body.trim().is_empty() {
            return Err(Error::Authentication(format!(
                "Empty response from {}",
                path
            )));
        }

        Ok(body)
    }

    /// First handshake leg: obtain an ephemeral request token.
    pub async fn request_token(&self) -> Result<RequestToken> {
        let params = [("oauth_callback".to_string(), "oob".to_string())];
        let body = self.post_oauth(REQUEST_TOKEN_PATH, &params, None).await?;
        RequestToken::from_form(&body)
    }

    /// URL the operator opens to approve the request token.
    pub fn authorize_url(&self, request_token: &RequestToken) -> Result<String> {
        let mut url = Url::parse(&format!("{}{}", self.oauth_base, AUTHORIZE_PATH))?;
        url.query_pairs_mut()
            .append_pair("oauth_token", &request_token.token);
        Ok(url.to_string())
    }

    /// Last handshake leg: trade the request token and verifier for an access token.
    pub async fn access_token(
        &self,
        request_token: &RequestToken,
        verifier: &str,
    ) -> Result<AccessToken> {
        let params = [("oauth_verifier".to_string(), verifier.to_string())];
        let body = self
            .post_oauth(
                ACCESS_TOKEN_PATH,
                &params,
                Some(&request_token.credentials()),
            )
            .await?;
        AccessToken::from_form(&body)
    }

    /// Fetch one page of the user's favorites.
    pub async fn favorites(
        &self,
        token: &AccessToken,
        request: &FavoritesRequest,
    ) -> Result<Vec<RawTweet>> {
        let url = format!("{}{}", self.api_base, FAVORITES_PATH);
        let params = request.params();
        let auth = self
            .signer
            .sign("GET", &url, &params, Some(&token.credentials()))?;

        tracing::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header(header::AUTHORIZATION, auth)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::Api("Rate limited by favorites endpoint".into()));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Auth error response: {}", body);
            return Err(Error::Authentication(format!("HTTP {}: {}", status, body)));
        }
        if !status.is_success() {
            return Err(Error::Api(format!("Favorites request failed: HTTP {}", status)));
        }

        let text = response.text().await?;
        tracing::debug!("Favorites response length: {} bytes", text.len());

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse favorites: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Start downloading a media file (unsigned GET).
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }

        Ok(response)
    }
}
