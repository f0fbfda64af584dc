use thiserror::Error;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::sites::DirectoryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("Map surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("No marker for site {0}")]
    UnknownSite(Uuid),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Map session {0} not found")]
    SessionNotFound(Uuid),
}

impl From<MapError> for AppError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::SurfaceUnavailable(msg) => AppError::Internal(msg),
            other => AppError::NotFound(other.to_string()),
        }
    }
}
