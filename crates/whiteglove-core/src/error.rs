use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhiteGloveError {
    #[error("not initialized: run 'whiteglove init'")]
    NotInitialized,

    #[error("release already exists: {0}")]
    ReleaseExists(String),

    #[error("partner not found: {0}")]
    PartnerNotFound(String),

    #[error("partner already exists: {0}")]
    PartnerExists(String),

    #[error("process already exists: {0}")]
    ProcessExists(String),

    #[error("invalid id '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidId(String),

    #[error("unknown state: {0}")]
    UnknownState(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("unknown connection type: {0}")]
    UnknownConnection(String),

    #[error("unknown direction: {0}")]
    UnknownDirection(String),

    #[error("unknown origin: {0}")]
    UnknownOrigin(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, WhiteGloveError>;
