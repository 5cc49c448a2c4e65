use serde::{Deserialize, Serialize};
use sweeper_core::GameError;
use sweeper_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unknown sign {0:?}, expected \"F\", \"?\" or \"\"")]
    UnknownSign(String),
    #[error("Game name must not be empty")]
    EmptyName,
    #[error("Malformed request: {0}")]
    Malformed(String),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

impl ProtocolError {
    /// HTTP status code a transport should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnknownSign(_) | Self::EmptyName | Self::Malformed(_) => 400,
            Self::Game(err) => game_status_code(err),
            Self::Store(StoreError::Game(err)) => game_status_code(err),
            Self::Store(StoreError::NotFound(_)) => 404,
            Self::Store(StoreError::NotOwner) => 403,
            Self::Store(StoreError::DuplicateName(_)) => 400,
            Self::Store(StoreError::Poisoned) => 500,
        }
    }

    /// Short machine-readable error name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownSign(_) => "unknown_sign",
            Self::EmptyName => "empty_name",
            Self::Malformed(_) => "malformed_request",
            Self::Game(err) | Self::Store(StoreError::Game(err)) => game_error_kind(err),
            Self::Store(StoreError::NotFound(_)) => "not_found",
            Self::Store(StoreError::NotOwner) => "not_owner",
            Self::Store(StoreError::DuplicateName(_)) => "duplicate_name",
            Self::Store(StoreError::Poisoned) => "internal",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind().to_owned(),
            detail: self.to_string(),
        }
    }
}

fn game_status_code(err: &GameError) -> u16 {
    match err {
        GameError::InvalidGeometry(_) | GameError::InvalidCoordinate => 400,
        GameError::GamePaused | GameError::GameAlreadyEnded | GameError::CellAlreadyRevealed => {
            409
        }
    }
}

fn game_error_kind(err: &GameError) -> &'static str {
    match err {
        GameError::InvalidGeometry(_) => "invalid_geometry",
        GameError::InvalidCoordinate => "invalid_coordinate",
        GameError::GamePaused => "game_paused",
        GameError::GameAlreadyEnded => "game_already_ended",
        GameError::CellAlreadyRevealed => "cell_already_revealed",
    }
}

/// Error payload sent back to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
}
