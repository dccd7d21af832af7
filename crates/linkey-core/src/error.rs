use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Missing {0}")]
    MissingParameter(&'static str),

    #[error("Missing URL")]
    MissingUrl,

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Ambiguous profile '{dir_name}' exists in {}; supply browser", .browsers.join(", "))]
    AmbiguousProfile {
        dir_name: String,
        browsers: Vec<String>,
    },

    #[error("No enabled profiles found")]
    NoEnabledProfiles,

    #[error("Launch error: {0}")]
    Launch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by the caller's input rather than local state
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter(_)
                | Error::MissingUrl
                | Error::ProfileNotFound(_)
                | Error::AmbiguousProfile { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
