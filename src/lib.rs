//! Client-side analytics tracking for Matomo-compatible endpoints.
//!
//! Build a [`TrackerConfig`], wrap it in a [`Tracker`] (or a shareable
//! [`TrackerHandle`]), and report hits. Transport failures are returned as
//! values inside [`TrackOutcome`] so a flaky endpoint never takes the host
//! application down with it.

pub mod config;
pub mod errors;
pub mod handle;
pub mod hit;
pub mod net;
pub mod params;
pub mod tracker;

pub use config::{TrackerConfig, TrackerConfigBuilder};
pub use errors::TrackerError;
pub use handle::TrackerHandle;
pub use hit::{Content, Event, SiteSearch};
pub use net::Response;
pub use params::{Params, UserInfo};
pub use tracker::{DispatchError, TrackOutcome, Tracker};
