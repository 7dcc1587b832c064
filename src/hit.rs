//! Per-call-kind hit builders.
//!
//! Each builder translates one kind of tracking call into the collection
//! API's flat parameter vocabulary. All builders are pure and synchronous:
//! required fields are checked up front, optional fields are emitted only
//! when present, and the caller's [`UserInfo`] bag is merged last so caller
//! keys win over builder-generated ones.

use crate::errors::TrackerError;
use crate::params::{Params, UserInfo};

/// A custom event hit (category/action, with optional name and value).
#[derive(Debug, Clone, Default)]
pub struct Event<'a> {
    pub category: &'a str,
    pub action: &'a str,
    pub name: Option<&'a str>,
    pub value: Option<f64>,
    pub campaign: Option<&'a str>,
}

/// A content-tracking hit (banner impressions and the like).
#[derive(Debug, Clone, Default)]
pub struct Content<'a> {
    pub name: &'a str,
    pub piece: Option<&'a str>,
    pub target: Option<&'a str>,
    pub interaction: Option<&'a str>,
}

/// An internal site-search hit.
#[derive(Debug, Clone, Default)]
pub struct SiteSearch<'a> {
    pub keyword: &'a str,
    pub category: Option<&'a str>,
    /// Number of results the search produced. `Some(0)` is meaningful
    /// (a search with no hits) and is emitted as `search_count=0`.
    pub count: Option<usize>,
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, TrackerError> {
    if value.trim().is_empty() {
        return Err(TrackerError::MissingField(field));
    }
    Ok(value)
}

fn finish(mut params: Params, user_info: Option<&UserInfo>) -> Params {
    if let Some(extra) = user_info {
        params.merge(extra);
    }
    params
}

/// Application-start hit. Reported as the fixed action `App / start`.
pub fn app_start(user_info: Option<&UserInfo>) -> Result<Params, TrackerError> {
    action("App / start", user_info)
}

/// Screen-view hit, reported as the action `Screen / {name}`.
pub fn screen_view(name: &str, user_info: Option<&UserInfo>) -> Result<Params, TrackerError> {
    let name = require(name, "name")?;
    action(&format!("Screen / {name}"), user_info)
}

/// Plain named-action hit.
pub fn action(name: &str, user_info: Option<&UserInfo>) -> Result<Params, TrackerError> {
    let name = require(name, "name")?;
    let mut params = Params::new();
    params.set("action_name", name);
    Ok(finish(params, user_info))
}

/// Custom event hit.
pub fn event(event: &Event<'_>, user_info: Option<&UserInfo>) -> Result<Params, TrackerError> {
    let category = require(event.category, "category")?;
    let event_action = require(event.action, "action")?;

    let mut params = Params::new();
    params.set("e_c", category);
    params.set("e_a", event_action);
    params.set_opt("e_n", event.name);
    params.set_opt("e_v", event.value);
    params.set_opt("mtm_campaign", event.campaign);
    Ok(finish(params, user_info))
}

/// Content-tracking hit.
pub fn content(content: &Content<'_>, user_info: Option<&UserInfo>) -> Result<Params, TrackerError> {
    let name = require(content.name, "name")?;

    let mut params = Params::new();
    params.set("c_n", name);
    params.set_opt("c_p", content.piece);
    params.set_opt("c_t", content.target);
    params.set_opt("c_i", content.interaction);
    Ok(finish(params, user_info))
}

/// Internal site-search hit.
pub fn site_search(search: &SiteSearch<'_>, user_info: Option<&UserInfo>) -> Result<Params, TrackerError> {
    let keyword = require(search.keyword, "keyword")?;

    let mut params = Params::new();
    params.set("search", keyword);
    params.set_opt("search_cat", search.category);
    params.set_opt("search_count", search.count);
    Ok(finish(params, user_info))
}

/// Outbound-link click hit.
pub fn outlink(link: &str, user_info: Option<&UserInfo>) -> Result<Params, TrackerError> {
    let link = require(link, "link")?;
    let mut params = Params::new();
    params.set("link", link);
    params.set("url", link);
    Ok(finish(params, user_info))
}

/// File-download hit.
pub fn download(download: &str, user_info: Option<&UserInfo>) -> Result<Params, TrackerError> {
    let download = require(download, "download")?;
    let mut params = Params::new();
    params.set("download", download);
    params.set("url", download);
    Ok(finish(params, user_info))
}
