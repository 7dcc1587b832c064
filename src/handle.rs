use std::sync::Arc;

use crate::errors::TrackerError;
use crate::hit::{Content, Event, SiteSearch};
use crate::params::{Params, UserInfo};
use crate::tracker::{TrackOutcome, Tracker};

/// Cheap-to-clone handle to a shared [`Tracker`].
///
/// One tracker is constructed per application and handed out as handles to
/// whichever components report hits. Cloning a handle never clones the
/// tracker; all clones dispatch through the same instance and see the same
/// user identity.
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    inner: Arc<Tracker>,
}

impl TrackerHandle {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            inner: Arc::new(tracker),
        }
    }

    /// True when both handles point at the same tracker instance.
    pub fn ptr_eq(&self, other: &TrackerHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn tracker(&self) -> &Tracker {
        &self.inner
    }

    pub fn update_user_id(&self, id: impl Into<String>) {
        self.inner.update_user_id(id);
    }

    pub fn remove_user_id(&self) {
        self.inner.remove_user_id();
    }

    pub async fn track_app_start(&self, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        self.inner.track_app_start(user_info).await
    }

    pub async fn track_screen_view(&self, name: &str, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        self.inner.track_screen_view(name, user_info).await
    }

    pub async fn track_action(&self, name: &str, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        self.inner.track_action(name, user_info).await
    }

    pub async fn track_event(&self, event: &Event<'_>, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        self.inner.track_event(event, user_info).await
    }

    pub async fn track_content(&self, content: &Content<'_>, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        self.inner.track_content(content, user_info).await
    }

    pub async fn track_site_search(&self, search: &SiteSearch<'_>, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        self.inner.track_site_search(search, user_info).await
    }

    pub async fn track_link(&self, link: &str, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        self.inner.track_link(link, user_info).await
    }

    pub async fn track_download(&self, download: &str, user_info: Option<&UserInfo>) -> Result<TrackOutcome, TrackerError> {
        self.inner.track_download(download, user_info).await
    }

    /// Dispatches an already-built parameter set as one hit.
    pub async fn track(&self, params: Params) -> TrackOutcome {
        self.inner.track(params).await
    }
}

impl From<Tracker> for TrackerHandle {
    fn from(tracker: Tracker) -> Self {
        Self::new(tracker)
    }
}
