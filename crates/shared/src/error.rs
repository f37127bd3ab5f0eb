use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// Building the map view or its tile layer failed.
    #[error("{0}")]
    Initialization(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The platform refused to start a location subscription.
    #[error("could not start location updates: {0}")]
    Subscription(String),
}
