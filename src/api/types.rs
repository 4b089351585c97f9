//! API request and response type definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::oauth::TokenCredentials;
use crate::error::{Error, Result};

/// Durable user credential issued at the end of the handshake.
///
/// Serialized with the upstream field names so credential files stay
/// readable across versions.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(rename = "oauth_token")]
    pub token: String,
    #[serde(rename = "oauth_token_secret")]
    pub token_secret: String,
    pub user_id: String,
    #[serde(rename = "screen_name")]
    pub handle: String,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("user_id", &self.user_id)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl AccessToken {
    /// Parse the form-encoded body returned by the access-token endpoint.
    pub fn from_form(body: &str) -> Result<Self> {
        let mut fields = parse_form(body);
        Ok(Self {
            token: take_field(&mut fields, "oauth_token")?,
            token_secret: take_field(&mut fields, "oauth_token_secret")?,
            user_id: fields.remove("user_id").unwrap_or_default(),
            handle: fields.remove("screen_name").unwrap_or_default(),
        })
    }

    /// Signing credentials for user-context requests.
    pub fn credentials(&self) -> TokenCredentials {
        TokenCredentials {
            key: self.token.clone(),
            secret: self.token_secret.clone(),
        }
    }
}

/// Ephemeral token used only between the first and last handshake legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    pub token: String,
    pub token_secret: String,
    pub callback_confirmed: bool,
}

impl RequestToken {
    /// Parse the form-encoded body returned by the request-token endpoint.
    pub fn from_form(body: &str) -> Result<Self> {
        let mut fields = parse_form(body);
        Ok(Self {
            token: take_field(&mut fields, "oauth_token")?,
            token_secret: take_field(&mut fields, "oauth_token_secret")?,
            callback_confirmed: fields
                .get("oauth_callback_confirmed")
                .map(|v| v == "true")
                .unwrap_or(false),
        })
    }

    pub fn credentials(&self) -> TokenCredentials {
        TokenCredentials {
            key: self.token.clone(),
            secret: self.token_secret.clone(),
        }
    }
}

fn parse_form(body: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(body.trim().as_bytes())
        .into_owned()
        .collect()
}

fn take_field(fields: &mut HashMap<String, String>, name: &str) -> Result<String> {
    fields
        .remove(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::Authentication(format!("Response is missing '{}'", name)))
}

/// Query parameters for one favorites page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoritesRequest {
    pub count: u32,
    pub max_id: Option<u64>,
}

impl FavoritesRequest {
    /// Query pairs in a stable order.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("count".to_string(), self.count.to_string()),
            ("include_entities".to_string(), "true".to_string()),
        ];
        if let Some(max_id) = self.max_id {
            params.push(("max_id".to_string(), max_id.to_string()));
        }
        params
    }
}

/// A tweet as returned by the favorites endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTweet {
    pub id: u64,
    #[serde(default, alias = "full_text")]
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Option<RawEntities>,
    #[serde(default)]
    pub extended_entities: Option<RawExtendedEntities>,
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntities {
    #[serde(default)]
    pub hashtags: Option<Vec<RawHashtag>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHashtag {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExtendedEntities {
    #[serde(default)]
    pub media: Option<Vec<RawMedia>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMedia {
    pub id: u64,
    pub media_url: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub screen_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_token_from_form() {
        let token = RequestToken::from_form(
            "oauth_token=req&oauth_token_secret=reqsecret&oauth_callback_confirmed=true",
        )
        .unwrap();
        assert_eq!(token.token, "req");
        assert_eq!(token.token_secret, "reqsecret");
        assert!(token.callback_confirmed);
    }

    #[test]
    fn test_access_token_from_form() {
        let token = AccessToken::from_form(
            "oauth_token=123-abc&oauth_token_secret=s%2Fecret&user_id=123&screen_name=someone\n",
        )
        .unwrap();
        assert_eq!(token.token, "123-abc");
        assert_eq!(token.token_secret, "s/ecret");
        assert_eq!(token.user_id, "123");
        assert_eq!(token.handle, "someone");
    }

    #[test]
    fn test_access_token_missing_secret() {
        let err = AccessToken::from_form("oauth_token=only").unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[test]
    fn test_access_token_serializes_with_upstream_names() {
        let token = AccessToken {
            token: "t".into(),
            token_secret: "s".into(),
            user_id: "1".into(),
            handle: "h".into(),
        };
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["oauth_token"], "t");
        assert_eq!(json["screen_name"], "h");
        assert!(!format!("{:?}", token).contains("\"s\""));
    }

    #[test]
    fn test_favorites_request_params() {
        let first = FavoritesRequest {
            count: 200,
            max_id: None,
        };
        assert!(!first.params().iter().any(|(k, _)| k == "max_id"));

        let next = FavoritesRequest {
            count: 200,
            max_id: Some(89),
        };
        assert!(next
            .params()
            .contains(&("max_id".to_string(), "89".to_string())));
    }

    #[test]
    fn test_raw_tweet_tolerates_missing_fields() {
        let raw: RawTweet = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(raw.id, 42);
        assert!(raw.entities.is_none());
        assert!(raw.user.is_none());
    }
}
