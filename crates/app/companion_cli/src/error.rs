use companion_api_client::ApiError;
use companion_core::ValidationError;
use companion_core::builder::BuilderError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Json: {}", .0)]
    Json(#[from] serde_json::Error),

    #[error("{}", .0)]
    Api(#[from] ApiError),

    #[error("{}", .0)]
    Builder(#[from] BuilderError),

    #[error("{}", .0)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Follow-up suggestion printed after the error line.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Api(e) if e.is_unauthorized() => {
                Some("Log in with `companion login --username <name>` and try again.")
            }
            Error::Api(e) if e.is_not_found() => {
                Some("Check the id, or pass --event explicitly, and try again.")
            }
            Error::Api(ApiError::Transport(_)) => {
                Some("Is the API reachable? Check --api-url / COMPANION_API_URL and retry.")
            }
            Error::Builder(BuilderError::ModuleNotFound(_)) => {
                Some("Run `companion admin modules` to list module ids and positions.")
            }
            Error::Builder(BuilderError::Store(_)) => {
                Some("The module list may be out of date; run `companion admin modules` to reload.")
            }
            _ => None,
        }
    }
}
