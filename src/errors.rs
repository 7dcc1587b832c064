#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Tracker URL base is required")]
    MissingUrlBase,

    #[error("Site ID is required")]
    MissingSiteId,

    #[error("Invalid tracker endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Missing required field '{0}'")]
    MissingField(&'static str),
}
