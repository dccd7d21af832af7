use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// HTTP status for a failed profile operation
pub fn status_for(err: &linkey_core::Error) -> StatusCode {
    use linkey_core::Error as Core;

    match err {
        Core::MissingParameter(_) | Core::MissingUrl | Core::AmbiguousProfile { .. } => {
            StatusCode::BAD_REQUEST
        }
        Core::ProfileNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
