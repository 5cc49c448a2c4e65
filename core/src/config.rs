use serde::{Deserialize, Serialize};

use crate::*;

/// Board geometry: `size` is `(rows, columns)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates the engine invariant: a non-empty grid with at least one safe cell.
    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked((rows, columns), mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows() == 0 {
            return Err(GameError::InvalidGeometry("rows must be positive"));
        }
        if self.columns() == 0 {
            return Err(GameError::InvalidGeometry("columns must be positive"));
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::InvalidGeometry(
                "mines must leave at least one safe cell",
            ));
        }
        Ok(())
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((16, 30), 99)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn columns(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Upper bound applied to the mine count on top of the engine invariant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineBound {
    /// Only `mines < rows * columns`.
    #[default]
    Engine,
    /// Also `mines < rows + columns - 1`.
    Classic,
}

/// Creation-time limits a host can configure on top of [`GameConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryPolicy {
    pub max_rows: Coord,
    pub max_columns: Coord,
    pub mine_bound: MineBound,
}

impl GeometryPolicy {
    pub const fn new(max_rows: Coord, max_columns: Coord, mine_bound: MineBound) -> Self {
        Self {
            max_rows,
            max_columns,
            mine_bound,
        }
    }

    pub fn check(&self, config: &GameConfig) -> Result<()> {
        config.validate()?;

        if config.rows() > self.max_rows {
            return Err(GameError::InvalidGeometry("too many rows"));
        }
        if config.columns() > self.max_columns {
            return Err(GameError::InvalidGeometry("too many columns"));
        }

        match self.mine_bound {
            MineBound::Engine => Ok(()),
            MineBound::Classic => {
                let bound = CellCount::from(config.rows()) + CellCount::from(config.columns()) - 1;
                if config.mines < bound {
                    Ok(())
                } else {
                    Err(GameError::InvalidGeometry(
                        "mines must be fewer than rows + columns - 1",
                    ))
                }
            }
        }
    }
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        Self::new(30, 30, MineBound::Engine)
    }
}
