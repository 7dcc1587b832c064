//! Tracker configuration.
//!
//! `TrackerConfig` holds everything the tracker needs to know at
//! construction time: where the collection endpoint lives, which site the
//! hits belong to, and the optional user identity. It is built through
//! [`TrackerConfig::builder()`], which validates the required fields and
//! resolves the effective endpoint, so a `TrackerConfig` that exists is
//! always usable.
//!
//! # Examples
//!
//! ```rust
//! use matomo_tracker::TrackerConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = TrackerConfig::builder()
//!     .url_base("https://stats.example.org")
//!     .site_id(3)
//!     .user_id("user-123")
//!     .log_enabled(true)
//!     .build()?;
//! assert_eq!(cfg.endpoint.as_str(), "https://stats.example.org/matomo.php");
//! # Ok(()) }
//! ```

use url::Url;

use crate::errors::TrackerError;

/// Path appended to the normalized URL base when no explicit tracker URL
/// override is given.
const DEFAULT_TRACKING_PATH: &str = "matomo.php";

/// Validated tracker configuration. Immutable once built; the user identity
/// can still change later through the tracker itself.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Normalized URL base, guaranteed to end in exactly one `/`.
    pub url_base: String,
    /// Resolved collection endpoint all hits are POSTed to.
    pub endpoint: Url,
    /// Numeric identifier of the tracked site within the analytics system.
    pub site_id: u32,
    /// Initial user identifier, sent as `uid` with every hit.
    pub user_id: Option<String>,
    /// When set, every tracking call is a no-op and nothing hits the network.
    pub disabled: bool,
    /// When set, each dispatched or skipped hit is logged at debug level.
    pub log_enabled: bool,
    /// Optional `User-Agent` header value for outgoing requests.
    pub user_agent: Option<String>,
}

impl TrackerConfig {
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }
}

/// Builder for [`TrackerConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrackerConfigBuilder {
    url_base: Option<String>,
    tracker_url: Option<String>,
    site_id: Option<u32>,
    user_id: Option<String>,
    disabled: bool,
    log_enabled: bool,
    user_agent: Option<String>,
}

impl TrackerConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Base URL of the analytics installation, e.g. `https://stats.example.org/`.
    pub fn url_base<S: Into<String>>(self, base: S) -> Self { self.map(|b| b.url_base = Some(base.into())) }
    /// Full endpoint override. When set, the default tracking path is not used.
    pub fn tracker_url<S: Into<String>>(self, url: S) -> Self { self.map(|b| b.tracker_url = Some(url.into())) }
    pub fn site_id(self, id: u32) -> Self { self.map(|b| b.site_id = Some(id)) }
    pub fn user_id<S: Into<String>>(self, id: S) -> Self { self.map(|b| b.user_id = Some(id.into())) }
    pub fn disabled(self, on: bool) -> Self { self.map(|b| b.disabled = on) }
    pub fn log_enabled(self, on: bool) -> Self { self.map(|b| b.log_enabled = on) }
    pub fn user_agent<S: Into<String>>(self, ua: S) -> Self { self.map(|b| b.user_agent = Some(ua.into())) }

    /// Validate and build the final config.
    ///
    /// Fails when `url_base` or `site_id` is absent, or when the resolved
    /// endpoint is not a parseable absolute URL.
    pub fn build(self) -> Result<TrackerConfig, TrackerError> {
        let url_base = match self.url_base {
            Some(base) if !base.trim().is_empty() => base,
            _ => return Err(TrackerError::MissingUrlBase),
        };
        let site_id = self.site_id.ok_or(TrackerError::MissingSiteId)?;

        let url_base = normalize_base(&url_base);
        let endpoint = self
            .tracker_url
            .unwrap_or_else(|| format!("{url_base}{DEFAULT_TRACKING_PATH}"));
        let endpoint = Url::parse(&endpoint).map_err(|e| TrackerError::InvalidEndpoint {
            url: endpoint,
            reason: e.to_string(),
        })?;

        Ok(TrackerConfig {
            url_base,
            endpoint,
            site_id,
            user_id: self.user_id,
            disabled: self.disabled,
            log_enabled: self.log_enabled,
            user_agent: self.user_agent,
        })
    }
}

/// Ensures the base ends with exactly one trailing `/`.
fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    format!("{trimmed}/")
}
