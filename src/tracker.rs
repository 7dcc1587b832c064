//! The tracker itself: owns the validated configuration and performs the
//! network round trip for every hit.
//!
//! Dispatch never panics and never returns a transport failure as `Err`: a
//! misbehaving analytics endpoint must not crash the host application, so
//! network and HTTP errors come back inside [`TrackOutcome`] where callers
//! can inspect (or ignore) them. Only programmer errors, a tracking call
//! missing its required field, surface as `Err` and they do so synchronously
//! before any network activity.

use std::sync::RwLock;

use crate::config::TrackerConfig;
use crate::errors::TrackerError;
use crate::hit::{self, Content, Event, SiteSearch};
use crate::net::{self, Response};
use crate::params::{Params, UserInfo};

/// Resolved result of one tracking call.
#[derive(Debug)]
pub enum TrackOutcome {
    /// The endpoint accepted the hit (2xx).
    Sent(Response),
    /// The hit did not arrive: transport failure or non-success status.
    Failed(DispatchError),
    /// Nothing was sent (tracking disabled, or an empty hit).
    Skipped,
}

impl TrackOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, TrackOutcome::Sent(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TrackOutcome::Skipped)
    }
}

/// Why a dispatched hit failed. Carried inside [`TrackOutcome::Failed`],
/// never propagated as `Err`.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint returned HTTP {status}")]
    Status { status: u16, response: Response },
}

/// Analytics tracker bound to one site on one collection endpoint.
///
/// Construct via a validated [`TrackerConfig`]; share between components by
/// wrapping in a [`TrackerHandle`](crate::handle::TrackerHandle).
pub struct Tracker {
    config: TrackerConfig,
    /// Current user identity, sent as `uid`. Mutable after construction
    /// through [`update_user_id`](Self::update_user_id); changes apply to
    /// future hits only.
    user_id: RwLock<Option<String>>,
    client: reqwest::Client,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("config", &self.config)
            .finish()
    }
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        let user_id = RwLock::new(config.user_id.clone());
        Self {
            config,
            user_id,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Sets the user identity included with future hits.
    pub fn update_user_id(&self, id: impl Into<String>) {
        if let Ok(mut guard) = self.user_id.write() {
            *guard = Some(id.into());
        }
    }

    /// Clears the user identity; future hits carry no `uid`.
    pub fn remove_user_id(&self) {
        if let Ok(mut guard) = self.user_id.write() {
            *guard = None;
        }
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_id.read().ok().and_then(|g| g.as_ref().cloned())
    }

    /// Application-start hit.
    pub async fn track_app_start(&self, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        if self.skip_disabled() {
            return Ok(TrackOutcome::Skipped);
        }
        Ok(self.track(hit::app_start(user_info)?).await)
    }

    /// Screen-view hit for the given screen name.
    pub async fn track_screen_view(&self, name: &str, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        if self.skip_disabled() {
            return Ok(TrackOutcome::Skipped);
        }
        Ok(self.track(hit::screen_view(name, user_info)?).await)
    }

    /// Named-action hit.
    pub async fn track_action(&self, name: &str, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        if self.skip_disabled() {
            return Ok(TrackOutcome::Skipped);
        }
        Ok(self.track(hit::action(name, user_info)?).await)
    }

    /// Custom event hit.
    pub async fn track_event(&self, event: &Event<'_>, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        if self.skip_disabled() {
            return Ok(TrackOutcome::Skipped);
        }
        Ok(self.track(hit::event(event, user_info)?).await)
    }

    /// Content-tracking hit.
    pub async fn track_content(&self, content: &Content<'_>, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        if self.skip_disabled() {
            return Ok(TrackOutcome::Skipped);
        }
        Ok(self.track(hit::content(content, user_info)?).await)
    }

    /// Internal site-search hit.
    pub async fn track_site_search(&self, search: &SiteSearch<'_>, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        if self.skip_disabled() {
            return Ok(TrackOutcome::Skipped);
        }
        Ok(self.track(hit::site_search(search, user_info)?).await)
    }

    /// Outbound-link click hit.
    pub async fn track_link(&self, link: &str, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        if self.skip_disabled() {
            return Ok(TrackOutcome::Skipped);
        }
        Ok(self.track(hit::outlink(link, user_info)?).await)
    }

    /// File-download hit.
    pub async fn track_download(&self, download: &str, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        if self.skip_disabled() {
            return Ok(TrackOutcome::Skipped);
        }
        Ok(self.track(hit::download(download, user_info)?).await)
    }

    /// Dispatches an already-built parameter set as one hit.
    ///
    /// No-op when tracking is disabled or `params` is empty. The special
    /// `lang` key is lifted out of the body into the `Accept-Language`
    /// header. The final body overlays the caller's params on top of the
    /// protocol defaults, so caller keys (including `idsite`) win.
    pub async fn track(&self, params: Params) -> TrackOutcome {
        if self.skip_disabled() {
            return TrackOutcome::Skipped;
        }
        if params.is_empty() {
            if self.config.log_enabled {
                log::debug!("Empty hit, nothing to send");
            }
            return TrackOutcome::Skipped;
        }

        let (lang, body) = self.assemble(params);

        let sent = net::post_form(
            &self.client,
            &self.config.endpoint,
            &lang,
            self.config.user_agent.as_deref(),
            &body,
        )
        .await;

        match sent {
            Ok(res) if res.is_success() => {
                if self.config.log_enabled {
                    log::debug!(
                        "Hit sent to {} ({} params, HTTP {})",
                        self.config.endpoint,
                        body.len(),
                        res.status
                    );
                }
                TrackOutcome::Sent(res)
            }
            Ok(res) => {
                log::warn!(
                    "Hit rejected by {}: HTTP {} {}",
                    self.config.endpoint,
                    res.status,
                    res.status_text
                );
                TrackOutcome::Failed(DispatchError::Status {
                    status: res.status,
                    response: res,
                })
            }
            Err(e) => {
                log::warn!("Hit to {} failed: {e}", self.config.endpoint);
                TrackOutcome::Failed(DispatchError::Transport(e))
            }
        }
    }

    /// Builds the final body for one hit and extracts the header-bound
    /// `lang` value. Order: protocol constants, `uid` when set,
    /// `send_image`, then the caller's params overlaid last.
    fn assemble(&self, mut params: Params) -> (String, Params) {
        let lang = params.remove("lang").unwrap_or_default();

        let mut body = Params::new();
        body.set("idsite", self.config.site_id);
        body.set("rec", 1);
        body.set("apiv", 1);
        if let Ok(guard) = self.user_id.read() {
            if let Some(uid) = guard.as_deref() {
                body.set("uid", uid);
            }
        }
        body.set("send_image", 0);
        for (k, v) in params.pairs() {
            body.set(k.clone(), v);
        }
        (lang, body)
    }

    fn skip_disabled(&self) -> bool {
        if self.config.disabled && self.config.log_enabled {
            log::debug!("Tracking is disabled, dropping hit");
        }
        self.config.disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerConfig;

    fn tracker() -> Tracker {
        let config = TrackerConfig::builder()
            .url_base("https://stats.example.org")
            .site_id(7)
            .build()
            .unwrap();
        Tracker::new(config)
    }

    #[test]
    fn assemble_orders_defaults_before_caller_fields() {
        let t = tracker();
        let mut params = Params::new();
        params.set("action_name", "Screen / Home");

        let (lang, body) = t.assemble(params);
        assert_eq!(lang, "");

        let keys: Vec<&str> = body.pairs().iter().map(|(k, _)| k.as_ref()).collect();
        assert_eq!(keys, ["idsite", "rec", "apiv", "send_image", "action_name"]);
        assert_eq!(body.get("idsite"), Some("7"));
        assert_eq!(body.get("rec"), Some("1"));
        assert_eq!(body.get("apiv"), Some("1"));
        assert_eq!(body.get("send_image"), Some("0"));
    }

    #[test]
    fn assemble_lifts_lang_out_of_the_body() {
        let t = tracker();
        let mut params = Params::new();
        params.set("action_name", "x");
        params.set("lang", "nl-NL");

        let (lang, body) = t.assemble(params);
        assert_eq!(lang, "nl-NL");
        assert_eq!(body.get("lang"), None);
    }

    #[test]
    fn assemble_lets_caller_override_protocol_defaults() {
        let t = tracker();
        let mut params = Params::new();
        params.set("idsite", 99);

        let (_, body) = t.assemble(params);
        assert_eq!(body.get("idsite"), Some("99"));
        // override replaces in place, no duplicate key
        let count = body.pairs().iter().filter(|(k, _)| k == "idsite").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn user_id_update_and_remove_affect_future_hits() {
        let t = tracker();
        let (_, body) = t.assemble(Params::new());
        assert_eq!(body.get("uid"), None);

        t.update_user_id("user-1");
        assert_eq!(t.user_id().as_deref(), Some("user-1"));
        let (_, body) = t.assemble(Params::new());
        assert_eq!(body.get("uid"), Some("user-1"));

        t.remove_user_id();
        assert_eq!(t.user_id(), None);
        let (_, body) = t.assemble(Params::new());
        assert_eq!(body.get("uid"), None);
    }

    #[tokio::test]
    async fn disabled_tracker_skips_before_validation() {
        let config = TrackerConfig::builder()
            .url_base("https://stats.example.org")
            .site_id(7)
            .disabled(true)
            .build()
            .unwrap();
        let t = Tracker::new(config);

        // even an invalid call is skipped, not rejected
        let outcome = t.track_screen_view("", None).await.unwrap();
        assert!(outcome.is_skipped());
    }

    #[tokio::test]
    async fn validation_errors_surface_before_dispatch() {
        let t = tracker();
        let err = t
            .track_event(&Event { action: "a", ..Default::default() }, None)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::MissingField("category")));
    }

    #[tokio::test]
    async fn empty_hit_is_skipped() {
        let t = tracker();
        assert!(t.track(Params::new()).await.is_skipped());
    }
}
