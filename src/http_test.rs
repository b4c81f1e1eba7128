use super::*;

#[test]
fn absolute_urls_pass_through() {
    assert_eq!(resolve_url("http://localhost:8080", "https://cdn.example/a.png"), "https://cdn.example/a.png");
}

#[test]
fn relative_urls_join_base() {
    assert_eq!(resolve_url("http://localhost:8080/", "/fonts/inter_bold.json"), "http://localhost:8080/fonts/inter_bold.json");
    assert_eq!(resolve_url("http://localhost:8080", "models/duck.glb"), "http://localhost:8080/models/duck.glb");
}

#[test]
fn cookie_uses_session_name() {
    assert_eq!(session_cookie("abc"), "tresde_session=abc");
}

#[test]
fn clients_build_with_default_timeouts() {
    assert!(HttpAssetFetcher::new("http://localhost:8080", HttpTimeouts::default()).is_ok());
    assert!(HttpSceneService::new("http://localhost:8080/", "abc", HttpTimeouts::default()).is_ok());
}

#[test]
fn invalid_session_is_rejected() {
    let result = HttpSceneService::new("http://localhost:8080", "bad\nvalue", HttpTimeouts::default());
    assert!(matches!(result, Err(HttpSetupError::Session(_))));
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let service = HttpSceneService::new("http://127.0.0.1:9", "abc", HttpTimeouts::default()).unwrap();
    assert!(matches!(service.list().await, Err(RemoteError::Transport(_))));
}
