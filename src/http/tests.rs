use super::*;

#[test]
fn test_default_config_sends_browser_user_agent() {
    let config = FetchConfig::default();
    assert_eq!(
        config.headers().get(USER_AGENT).unwrap(),
        DEFAULT_USER_AGENT
    );
    assert_eq!(config.headers().len(), 1);
}

#[test]
fn test_config_user_agent_override() {
    let config = FetchConfig::default().user_agent("curl/8.0").unwrap();
    assert_eq!(config.headers().get(USER_AGENT).unwrap(), "curl/8.0");
    assert_eq!(config.headers().len(), 1);
}

#[test]
fn test_config_user_agent_invalid() {
    let result = FetchConfig::default().user_agent("bad\nagent");
    assert!(result.is_err());
}

#[test]
fn test_config_with_headers() {
    let mut headers = HeaderMap::new();
    headers.insert("x-extra", HeaderValue::from_static("1"));
    let config = FetchConfig::with_headers(headers);
    assert!(config.headers().get(USER_AGENT).is_none());
    assert_eq!(config.headers().get("x-extra").unwrap(), "1");
}

#[test]
fn test_fetch_error_display() {
    let transport = FetchError::Transport {
        status: 404,
        reason: "Not Found".to_owned(),
    };
    assert_eq!(transport.to_string(), "HTTP Error: 404 - Not Found");

    let network = FetchError::Network {
        reason: "connection refused".to_owned(),
    };
    assert_eq!(network.to_string(), "URL Error: connection refused");

    let unexpected = FetchError::Unexpected {
        message: "boom".to_owned(),
    };
    assert_eq!(unexpected.to_string(), "An error occurred: boom");
}

#[test]
fn test_describe_joins_error_sources() {
    let inner = std::io::Error::other("disk on fire");
    let outer = anyhow::Error::new(inner).context("Failed to write");
    let text = describe(&*outer);
    assert_eq!(text, "Failed to write: disk on fire");
}

#[tokio::test]
async fn fetch_returns_body_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let body = "{\"a\": 1}\n<p>héllo 世界</p>";

    let mock = server
        .mock("GET", "/page")
        .with_status(200_usize)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .expect(1_usize)
        .create_async()
        .await;

    let client = PageClient::default();
    let result = client.fetch(&format!("{}/page", server.url())).await;

    mock.assert_async().await;
    assert_eq!(result.expect("successful fetch"), body);
}

#[tokio::test]
async fn fetch_sends_browser_user_agent() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .with_status(200_usize)
        .with_body("ok")
        .expect(1_usize)
        .create_async()
        .await;

    let client = PageClient::default();
    let result = client.fetch(&server.url()).await;

    mock.assert_async().await;
    assert_eq!(result.unwrap(), "ok");
}

#[tokio::test]
async fn fetch_sends_configured_user_agent() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .match_header("user-agent", "page-fetcher-test/1.0")
        .with_status(200_usize)
        .with_body("ok")
        .expect(1_usize)
        .create_async()
        .await;

    let config = FetchConfig::default()
        .user_agent("page-fetcher-test/1.0")
        .unwrap()
        .timeout(Duration::from_secs(5));
    let client = PageClient::new(config).unwrap();
    let result = client.fetch(&server.url()).await;

    mock.assert_async().await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn fetch_404_is_transport_error() {
    let mut server = mockito::Server::new_async().await;

    // One attempt only, even for failures
    let mock = server
        .mock("GET", "/missing")
        .with_status(404_usize)
        .with_body("Not Found")
        .expect(1_usize)
        .create_async()
        .await;

    let client = PageClient::default();
    let result = client.fetch(&format!("{}/missing", server.url())).await;

    mock.assert_async().await;
    let error = result.expect_err("should be a 404 error");
    assert_eq!(
        error,
        FetchError::Transport {
            status: 404,
            reason: "Not Found".to_owned(),
        }
    );
    assert!(error.to_string().contains("404"));
}

#[tokio::test]
async fn fetch_500_is_not_retried() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/")
        .with_status(500_usize)
        .with_body("Internal Server Error")
        .expect(1_usize)
        .create_async()
        .await;

    let client = PageClient::default();
    let result = client.fetch(&server.url()).await;

    mock.assert_async().await;
    assert!(matches!(
        result,
        Err(FetchError::Transport { status: 500, .. })
    ));
}

#[tokio::test]
async fn fetch_follows_redirect() {
    let mut server = mockito::Server::new_async().await;

    let redirect = server
        .mock("GET", "/old")
        .with_status(301_usize)
        .with_header("location", "/new")
        .create_async()
        .await;
    let target = server
        .mock("GET", "/new")
        .with_status(200_usize)
        .with_body("moved here")
        .create_async()
        .await;

    let client = PageClient::default();
    let result = client.fetch(&format!("{}/old", server.url())).await;

    redirect.assert_async().await;
    target.assert_async().await;
    assert_eq!(result.unwrap(), "moved here");
}

#[tokio::test]
async fn fetch_empty_body_is_success() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/")
        .with_status(200_usize)
        .with_body("")
        .create_async()
        .await;

    let client = PageClient::default();
    let result = client.fetch(&server.url()).await;
    assert_eq!(result.unwrap(), "");
}

#[tokio::test]
async fn fetch_invalid_utf8_is_unexpected_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/")
        .with_status(200_usize)
        .with_body([0x66_u8, 0x6f, 0xff, 0xfe])
        .create_async()
        .await;

    let client = PageClient::default();
    let result = client.fetch(&server.url()).await;

    match result {
        Err(FetchError::Unexpected { message }) => assert!(message.contains("UTF-8")),
        other => panic!("expected decode failure, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_unreachable_host_is_network_error() {
    // Port 1 on loopback refuses connections
    let client = PageClient::default();
    let result = client.fetch("http://127.0.0.1:1/").await;

    match result {
        Err(FetchError::Network { reason }) => assert!(!reason.is_empty()),
        other => panic!("expected network failure, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_malformed_url_is_unexpected_error() {
    let client = PageClient::default();
    let result = client.fetch("not a valid url").await;
    assert!(matches!(result, Err(FetchError::Unexpected { .. })));
}

#[tokio::test]
async fn fetch_page_collapses_failure_to_none() {
    let mut server = mockito::Server::new_async().await;

    let _missing = server
        .mock("GET", "/missing")
        .with_status(404_usize)
        .create_async()
        .await;
    let _found = server
        .mock("GET", "/found")
        .with_status(200_usize)
        .with_body("here")
        .create_async()
        .await;

    let client = PageClient::default();
    assert_eq!(
        client.fetch_page(&format!("{}/missing", server.url())).await,
        None
    );
    assert_eq!(
        client
            .fetch_page(&format!("{}/found", server.url()))
            .await
            .as_deref(),
        Some("here")
    );
}
