//! End-to-end demo: build a tracker, hand out a shared handle, report a few
//! hits. Point `TRACKER_URL_BASE` at a real installation to see them arrive.
//!
//! Run with: `RUST_LOG=debug cargo run --example basic`

use matomo_tracker::{Event, SiteSearch, Tracker, TrackerConfig, TrackerHandle, UserInfo};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let url_base =
        std::env::var("TRACKER_URL_BASE").unwrap_or_else(|_| "https://demo.matomo.cloud".to_string());

    let config = TrackerConfig::builder()
        .url_base(url_base)
        .site_id(1)
        .user_id("demo-user")
        .log_enabled(true)
        .build()?;

    let tracker = TrackerHandle::new(Tracker::new(config));

    let outcome = tracker.track_app_start(None).await?;
    println!("app start: {outcome:?}");

    let outcome = tracker.track_screen_view("Home", None).await?;
    println!("screen view: {outcome:?}");

    let user_info = UserInfo::from([("lang".to_string(), "en-US".to_string())]);
    let outcome = tracker
        .track_event(
            &Event {
                category: "demo",
                action: "run",
                value: Some(1.0),
                ..Default::default()
            },
            Some(&user_info),
        )
        .await?;
    println!("event: {outcome:?}");

    let outcome = tracker
        .track_site_search(&SiteSearch { keyword: "rust", count: Some(0), ..Default::default() }, None)
        .await?;
    println!("site search: {outcome:?}");

    Ok(())
}
