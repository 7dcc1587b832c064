//! Wire-level tests: what actually reaches the collection endpoint.
//!
//! Body assertions use exact matches where possible; the body order is
//! deterministic (protocol constants, `uid`, `send_image`, call fields),
//! so an exact match also pins the overlay order.

use httpmock::prelude::*;

use matomo_tracker::{
    Content, DispatchError, SiteSearch, TrackOutcome, Tracker, TrackerConfig, UserInfo,
};

fn config_for(server: &MockServer) -> TrackerConfig {
    TrackerConfig::builder()
        .url_base(server.base_url())
        .site_id(7)
        .build()
        .unwrap()
}

#[tokio::test]
async fn sent_hit_carries_protocol_defaults_in_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/matomo.php")
                .header("accept", "application/json")
                .header("content-type", "application/x-www-form-urlencoded; charset=UTF-8")
                .body("idsite=7&rec=1&apiv=1&send_image=0&action_name=App+%2F+start");
            then.status(204);
        })
        .await;

    let tracker = Tracker::new(config_for(&server));
    let outcome = tracker.track_app_start(None).await.unwrap();

    assert!(outcome.is_sent());
    mock.assert_async().await;
}

#[tokio::test]
async fn disabled_tracker_performs_no_requests() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(204);
        })
        .await;

    let config = TrackerConfig::builder()
        .url_base(server.base_url())
        .site_id(7)
        .disabled(true)
        .build()
        .unwrap();
    let tracker = Tracker::new(config);

    assert!(tracker.track_app_start(None).await.unwrap().is_skipped());
    assert!(tracker.track_screen_view("Home", None).await.unwrap().is_skipped());
    assert!(tracker.track_link("https://example.com", None).await.unwrap().is_skipped());

    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn zero_search_count_reaches_the_wire() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/matomo.php")
                .body("idsite=7&rec=1&apiv=1&send_image=0&search=rust&search_count=0");
            then.status(204);
        })
        .await;

    let tracker = Tracker::new(config_for(&server));
    let outcome = tracker
        .track_site_search(&SiteSearch { keyword: "rust", count: Some(0), ..Default::default() }, None)
        .await
        .unwrap();

    assert!(outcome.is_sent());
    mock.assert_async().await;
}

#[tokio::test]
async fn content_hit_reaches_the_wire() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/matomo.php")
                .body("idsite=7&rec=1&apiv=1&send_image=0&c_n=spring-banner&c_p=banner.png");
            then.status(204);
        })
        .await;

    let tracker = Tracker::new(config_for(&server));
    let outcome = tracker
        .track_content(
            &Content { name: "spring-banner", piece: Some("banner.png"), ..Default::default() },
            None,
        )
        .await
        .unwrap();

    assert!(outcome.is_sent());
    mock.assert_async().await;
}

#[tokio::test]
async fn lang_travels_as_header_never_as_body_param() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/matomo.php")
                .header("accept-language", "nl-NL")
                // exact body, so no `lang=` can hide anywhere
                .body("idsite=7&rec=1&apiv=1&send_image=0&action_name=x");
            then.status(204);
        })
        .await;

    let tracker = Tracker::new(config_for(&server));
    let user_info = UserInfo::from([("lang".to_string(), "nl-NL".to_string())]);
    let outcome = tracker.track_action("x", Some(&user_info)).await.unwrap();

    assert!(outcome.is_sent());
    mock.assert_async().await;
}

#[tokio::test]
async fn non_ok_status_resolves_as_failure_value() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/matomo.php");
            then.status(500);
        })
        .await;

    let tracker = Tracker::new(config_for(&server));
    // the call itself succeeds; the failure is carried in the outcome
    let outcome = tracker.track_action("x", None).await.unwrap();

    match outcome {
        TrackOutcome::Failed(DispatchError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_resolves_as_failure_value() {
    // nothing listens on the discard port
    let config = TrackerConfig::builder()
        .url_base("http://127.0.0.1:9/")
        .site_id(7)
        .build()
        .unwrap();
    let tracker = Tracker::new(config);

    let outcome = tracker.track_action("x", None).await.unwrap();
    assert!(matches!(outcome, TrackOutcome::Failed(DispatchError::Transport(_))));
}

#[tokio::test]
async fn user_info_overrides_protocol_defaults() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/matomo.php")
                .body("idsite=99&rec=1&apiv=1&send_image=0&action_name=x");
            then.status(204);
        })
        .await;

    let tracker = Tracker::new(config_for(&server));
    let user_info = UserInfo::from([("idsite".to_string(), "99".to_string())]);
    let outcome = tracker.track_action("x", Some(&user_info)).await.unwrap();

    assert!(outcome.is_sent());
    mock.assert_async().await;
}

#[tokio::test]
async fn uid_follows_identity_updates() {
    let server = MockServer::start_async().await;
    let with_uid = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/matomo.php")
                .body("idsite=7&rec=1&apiv=1&uid=user-1&send_image=0&action_name=x");
            then.status(204);
        })
        .await;
    let without_uid = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/matomo.php")
                .body("idsite=7&rec=1&apiv=1&send_image=0&action_name=x");
            then.status(204);
        })
        .await;

    let tracker = Tracker::new(config_for(&server));

    tracker.update_user_id("user-1");
    tracker.track_action("x", None).await.unwrap();
    assert_eq!(with_uid.hits_async().await, 1);

    tracker.remove_user_id();
    tracker.track_action("x", None).await.unwrap();
    assert_eq!(without_uid.hits_async().await, 1);
}

#[tokio::test]
async fn configured_user_agent_reaches_the_wire() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/matomo.php")
                .header("user-agent", "example-app/1.0");
            then.status(204);
        })
        .await;

    let config = TrackerConfig::builder()
        .url_base(server.base_url())
        .site_id(7)
        .user_agent("example-app/1.0")
        .build()
        .unwrap();
    let tracker = Tracker::new(config);

    tracker.track_app_start(None).await.unwrap();
    mock.assert_async().await;
}
