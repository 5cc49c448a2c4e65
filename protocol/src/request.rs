use serde::{Deserialize, Serialize};
use sweeper_core::{
    CellCount, Coord, GameConfig, GameError, GeometryPolicy, MineBound, MoveKind,
};

use crate::*;

/// Body of a game creation request. Missing geometry falls back to the
/// beginner board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    #[serde(default = "default_rows")]
    pub rows: i64,
    #[serde(default = "default_columns")]
    pub columns: i64,
    #[serde(default = "default_mines")]
    pub mines: i64,
}

fn default_rows() -> i64 {
    GameConfig::beginner().rows().into()
}

fn default_columns() -> i64 {
    GameConfig::beginner().columns().into()
}

fn default_mines() -> i64 {
    GameConfig::beginner().mines.into()
}

impl CreateGameRequest {
    /// Policy clients are held to: `mines < rows + columns - 1`.
    pub const CLIENT_POLICY: GeometryPolicy =
        GeometryPolicy::new(Coord::MAX, Coord::MAX, MineBound::Classic);

    pub fn to_config(&self) -> Result<GameConfig> {
        self.to_config_with(&Self::CLIENT_POLICY)
    }

    /// Checks the request against the engine invariant and `policy`.
    pub fn to_config_with(&self, policy: &GeometryPolicy) -> Result<GameConfig> {
        if self.name.trim().is_empty() {
            return Err(ProtocolError::EmptyName);
        }

        let rows = Coord::try_from(self.rows)
            .map_err(|_| GameError::InvalidGeometry("rows out of range"))?;
        let columns = Coord::try_from(self.columns)
            .map_err(|_| GameError::InvalidGeometry("columns out of range"))?;
        let mines = CellCount::try_from(self.mines)
            .map_err(|_| GameError::InvalidGeometry("mines out of range"))?;

        let config = GameConfig::new(rows, columns, mines)?;
        policy.check(&config)?;
        Ok(config)
    }
}

/// Body of a move request. `sign` selects the kind of move: absent or null
/// reveals, `"F"` flags, `"?"` questions and `""` clears the mark.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(default)]
    pub row: Option<i64>,
    #[serde(default)]
    pub column: Option<i64>,
    #[serde(default)]
    pub sign: Option<String>,
}

impl MoveRequest {
    pub fn reveal(row: i64, column: i64) -> Self {
        Self {
            row: Some(row),
            column: Some(column),
            sign: None,
        }
    }

    pub fn with_sign(row: i64, column: i64, sign: &str) -> Self {
        Self {
            sign: Some(sign.to_owned()),
            ..Self::reveal(row, column)
        }
    }

    /// Resolves the request into `(row, column, kind)`.
    pub fn to_move(&self) -> Result<(Coord, Coord, MoveKind)> {
        let kind = parse_sign(self.sign.as_deref())?;
        let row = to_coord(self.row)?;
        let column = to_coord(self.column)?;
        Ok((row, column, kind))
    }
}

pub fn parse_sign(sign: Option<&str>) -> Result<MoveKind> {
    match sign {
        None => Ok(MoveKind::Reveal),
        Some("F") => Ok(MoveKind::Flag),
        Some("?") => Ok(MoveKind::Question),
        Some("") => Ok(MoveKind::Clear),
        Some(other) => Err(ProtocolError::UnknownSign(other.to_owned())),
    }
}

/// The sign a client would send for `kind`.
pub const fn sign_of(kind: MoveKind) -> Option<&'static str> {
    match kind {
        MoveKind::Reveal => None,
        MoveKind::Flag => Some("F"),
        MoveKind::Question => Some("?"),
        MoveKind::Clear => Some(""),
    }
}

fn to_coord(value: Option<i64>) -> Result<Coord> {
    value
        .and_then(|value| Coord::try_from(value).ok())
        .ok_or(ProtocolError::Game(GameError::InvalidCoordinate))
}
