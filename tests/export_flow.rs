//! End-to-end runs against a mock API server.

use std::path::Path;

use serde_json::json;
use wiremock::{
    matchers::{header_exists, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use likes_exporter::{
    auth::{CredentialStore, StaticVerifier},
    config::Config,
    error::Error,
    run_export, Tweet, TwitterApi,
};

fn config(server: &MockServer, dir: &Path) -> Config {
    let mut config = Config::default();
    config.api.consumer_key = "ck".into();
    config.api.consumer_secret = "cs".into();
    config.api.api_base = server.uri();
    config.api.oauth_base = server.uri();
    config.storage.credential_path = dir.join("oauth.b64.enc");
    config.storage.cache_path = dir.join("response.json");
    config.storage.media_dir = dir.join("img");
    config.storage.passphrase = "correct horse".into();
    config.options.download_delay_ms = 0;
    config.options.show_progress = false;
    config
}

fn tweet(server: &MockServer, id: u64, media: Option<&str>) -> serde_json::Value {
    let mut tweet = json!({
        "id": id,
        "text": format!("liked {}", id),
        "entities": { "hashtags": [{ "text": "art" }] },
        "user": { "id": 7, "name": "Artist", "screen_name": "artist" },
        "lang": "en"
    });
    if let Some(name) = media {
        tweet["extended_entities"] = json!({ "media": [{
            "id": id * 10,
            "media_url": format!("{}/media/{}", server.uri(), name),
            "url": "https://t.co/abc",
            "type": "photo"
        }]});
    }
    tweet
}

async fn mount_handshake(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/request_token"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "oauth_token=req&oauth_token_secret=reqsecret&oauth_callback_confirmed=true",
        ))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "oauth_token=42-acc&oauth_token_secret=accsecret&user_id=42&screen_name=me",
        ))
        .expect(1)
        .mount(server)
        .await;
}

/// First page at the head of the timeline, then an empty page below `last_id`.
async fn mount_favorites(server: &MockServer, page: serde_json::Value, last_id: u64) {
    Mock::given(method("GET"))
        .and(path("/1.1/favorites/list.json"))
        .and(query_param("max_id", (last_id - 1).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/1.1/favorites/list.json"))
        .and(query_param("include_entities", "true"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .mount(server)
        .await;
}

async fn mount_media(server: &MockServer, name: &str, body: &[u8], times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/media/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(times)
        .mount(server)
        .await;
}

fn cached_ids(config: &Config) -> Vec<u64> {
    let content = std::fs::read_to_string(&config.storage.cache_path).unwrap();
    let tweets: Vec<Tweet> = serde_json::from_str(&content).unwrap();
    tweets.iter().map(|t| t.id).collect()
}

#[tokio::test]
async fn test_first_run_authorizes_and_downloads() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());

    mount_handshake(&server).await;
    mount_favorites(
        &server,
        json!([tweet(&server, 105, Some("a.jpg")), tweet(&server, 100, None)]),
        100,
    )
    .await;
    mount_media(&server, "a.jpg", b"jpeg bytes", 1).await;

    let api = TwitterApi::new(&config.api).unwrap();
    let summary = run_export(&api, &config, &StaticVerifier("1234567".into()))
        .await
        .unwrap();

    assert_eq!(summary.new_tweets, 1);
    assert_eq!(summary.new_media, 1);
    assert_eq!(summary.downloads.downloaded, 1);
    assert!(!summary.is_partial());
    assert_eq!(cached_ids(&config), vec![105]);
    assert_eq!(
        std::fs::read(config.storage.media_dir.join("a.jpg")).unwrap(),
        b"jpeg bytes"
    );

    let token = CredentialStore::new("correct horse")
        .load(&config.storage.credential_path)
        .await
        .unwrap();
    assert_eq!(token.token, "42-acc");
    assert_eq!(token.handle, "me");
}

#[tokio::test]
async fn test_rerun_uses_cached_token_and_skips_known_media() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());

    // The handshake and each media file are expected exactly once across both runs.
    mount_handshake(&server).await;
    mount_favorites(
        &server,
        json!([tweet(&server, 105, Some("a.jpg")), tweet(&server, 90, Some("b.jpg"))]),
        90,
    )
    .await;
    mount_media(&server, "a.jpg", b"a", 1).await;
    mount_media(&server, "b.jpg", b"b", 1).await;

    let api = TwitterApi::new(&config.api).unwrap();
    let verifier = StaticVerifier("1234567".into());

    let first = run_export(&api, &config, &verifier).await.unwrap();
    assert_eq!(first.new_tweets, 2);

    let second = run_export(&api, &config, &verifier).await.unwrap();
    assert_eq!(second.new_tweets, 0);
    assert_eq!(second.downloads.total(), 0);
    assert_eq!(cached_ids(&config), vec![105, 90]);
}

#[tokio::test]
async fn test_failed_page_keeps_partial_results() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());

    mount_handshake(&server).await;
    Mock::given(method("GET"))
        .and(path("/1.1/favorites/list.json"))
        .and(query_param("max_id", "89"))
        .respond_with(ResponseTemplate::new(503))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1.1/favorites/list.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            tweet(&server, 95, Some("p1.jpg")),
            tweet(&server, 90, Some("p2.jpg")),
        ])))
        .mount(&server)
        .await;
    mount_media(&server, "p1.jpg", b"1", 1).await;
    mount_media(&server, "p2.jpg", b"2", 1).await;

    let api = TwitterApi::new(&config.api).unwrap();
    let summary = run_export(&api, &config, &StaticVerifier("1".into()))
        .await
        .unwrap();

    assert!(summary.truncated);
    assert_eq!(summary.resume_cursor, Some(90));
    assert_eq!(summary.downloads.downloaded, 2);
    assert_eq!(cached_ids(&config), vec![95, 90]);
}

#[tokio::test]
async fn test_failed_download_does_not_stop_batch() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());

    mount_handshake(&server).await;
    mount_favorites(
        &server,
        json!([
            tweet(&server, 105, Some("gone.jpg")),
            tweet(&server, 100, Some("ok.jpg")),
        ]),
        100,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/media/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_media(&server, "ok.jpg", b"ok", 1).await;

    let api = TwitterApi::new(&config.api).unwrap();
    let summary = run_export(&api, &config, &StaticVerifier("1".into()))
        .await
        .unwrap();

    assert_eq!(summary.downloads.downloaded, 1);
    assert_eq!(summary.downloads.failed.len(), 1);
    assert!(summary.is_partial());
    assert!(!config.storage.media_dir.join("gone.jpg").exists());
    assert!(!config.storage.media_dir.join("gone.jpg.part").exists());
    assert!(config.storage.media_dir.join("ok.jpg").exists());
}

#[tokio::test]
async fn test_rejected_handshake_is_fatal() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(&server, dir.path());

    Mock::given(method("POST"))
        .and(path("/oauth/request_token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid consumer key"))
        .mount(&server)
        .await;

    let api = TwitterApi::new(&config.api).unwrap();
    let err = run_export(&api, &config, &StaticVerifier("1".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Authentication(_)));
    assert!(err.is_fatal());
    assert!(!config.storage.credential_path.exists());
    assert!(!config.storage.cache_path.exists());
}

#[tokio::test]
async fn test_wrong_passphrase_does_not_restart_handshake() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&server, dir.path());

    mount_handshake(&server).await;
    mount_favorites(&server, json!([]), 1).await;

    let api = TwitterApi::new(&config.api).unwrap();
    run_export(&api, &config, &StaticVerifier("1".into()))
        .await
        .unwrap();

    config.storage.passphrase = "battery staple".into();
    let err = run_export(&api, &config, &StaticVerifier("1".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Crypto(_)));
}
