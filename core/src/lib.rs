use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Validated session parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    width: Coord,
    height: Coord,
    mine_ratio: f64,
}

impl GameConfig {
    /// Fails with [`GameError::InvalidConfiguration`] when a dimension is
    /// zero or `mine_ratio` falls outside the open interval `(0, 1)`.
    pub fn new(width: Coord, height: Coord, mine_ratio: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        if !(mine_ratio > 0.0 && mine_ratio < 1.0) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self {
            width,
            height,
            mine_ratio,
        })
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn total_tiles(&self) -> TileCount {
        mult(self.width, self.height)
    }

    /// Mines placed for this configuration, `floor(mine_ratio * width * height)`.
    /// Always below `total_tiles` since the ratio is below one.
    pub fn mine_count(&self) -> TileCount {
        (self.mine_ratio * f64::from(self.total_tiles())).floor() as TileCount
    }
}

/// Fixed-size tile storage addressed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Array2<Tile>,
}

impl Grid {
    /// Creates a grid with every tile hidden and carrying a zero count.
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self {
            tiles: Array2::default([height as usize, width as usize]),
        })
    }

    pub fn width(&self) -> Coord {
        self.tiles.dim().1.try_into().unwrap()
    }

    pub fn height(&self) -> Coord {
        self.tiles.dim().0.try_into().unwrap()
    }

    pub fn total_tiles(&self) -> TileCount {
        self.tiles.len().try_into().unwrap()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.tiles.dim();
        if usize::from(coords.0) < rows && usize::from(coords.1) < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    /// Marks the tile as a mine, leaving its neighbors alone. Idempotent.
    pub fn set_mine(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.tiles[coords.to_nd_index()].set_mine();
        Ok(())
    }

    pub fn increment_adjacency(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.tiles[coords.to_nd_index()].increment_adjacency();
        Ok(())
    }

    /// Places a mine and bumps the adjacency count of every in-bounds
    /// neighbor. Placing on an already mined tile is a no-op so neighbor
    /// counts are never double-incremented.
    pub fn place_mine(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if self.tiles[coords.to_nd_index()].is_mine() {
            return Ok(());
        }

        self.tiles[coords.to_nd_index()].set_mine();
        for pos in self.tiles.iter_neighbors(coords) {
            self.tiles[pos.to_nd_index()].increment_adjacency();
        }
        Ok(())
    }

    pub fn mine_tile_count(&self) -> TileCount {
        self.tiles
            .iter()
            .filter(|tile| tile.is_mine())
            .count()
            .try_into()
            .unwrap()
    }

    pub(crate) fn tile(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> &mut Tile {
        &mut self.tiles[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.tiles.iter_neighbors(coords)
    }

    pub(crate) fn reveal_all(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.apply_state(TileState::Revealed);
        }
    }
}

/// Outcome of a single reported interaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportOutcome {
    Continue,
    Won,
    Lost,
}

impl ReportOutcome {
    /// Whether the interaction ended the game, so the caller can stop
    /// issuing further interactions.
    pub const fn is_terminal(self) -> bool {
        use ReportOutcome::*;
        match self {
            Continue => false,
            Won => true,
            Lost => true,
        }
    }
}
