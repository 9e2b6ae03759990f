use thiserror::Error;

/// Why a placement attempt was abandoned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// There is no frontmost/focused window to move.
    #[error("no focused window")]
    WindowNotFound,

    /// The window does not overlap any display (e.g. it is fully off-screen).
    #[error("window is not on any display")]
    DisplayNotFound,

    /// Reading or writing window geometry failed.
    #[error("window backend failed: {0}")]
    Backend(String),
}

impl PlacementError {
    pub fn backend(message: impl Into<String>) -> Self {
        PlacementError::Backend(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PlacementError>;
