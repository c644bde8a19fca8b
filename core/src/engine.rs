use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::*;

/// Two-phase generation lifecycle: mines are not placed until the first
/// reported interaction, so the first revealed tile is never a mine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationPhase {
    Pending,
    Generated,
}

impl GenerationPhase {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Result of a session.
///
/// Valid transitions: InProgress -> Won and InProgress -> Lost. Terminal
/// states never change again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Won,
    Lost,
}

impl GameResult {
    pub const fn is_final(self) -> bool {
        use GameResult::*;
        match self {
            InProgress => false,
            Won => true,
            Lost => true,
        }
    }
}

impl Default for GameResult {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Represents a game from creation to its terminal result.
///
/// The session exclusively owns its grid and is mutated only through
/// [`GameSession::report`] (plus the end-of-game [`GameSession::reveal_all`]
/// board exposure).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    grid: Grid,
    seed: u64,
    phase: GenerationPhase,
    mine_count: TileCount,
    safe_left: TileCount,
    flag_count: TileCount,
    flagged_mines: TileCount,
    result: GameResult,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Creates a session with an entropy-derived seed.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    /// Creates a session whose mine layout is fully determined by `seed` and
    /// the first interacted coordinate.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let grid = Grid::new(config.width(), config.height())?;
        let mine_count = config.mine_count();

        Ok(Self {
            grid,
            seed,
            phase: GenerationPhase::Pending,
            mine_count,
            safe_left: config.total_tiles() - mine_count,
            flag_count: 0,
            flagged_mines: 0,
            result: Default::default(),
            triggered_mine: None,
        })
    }

    /// Builds an already-generated session from an explicit mine layout,
    /// bypassing both the ratio configuration and the deferred generation.
    /// Duplicate coordinates collapse into a single mine.
    pub fn from_mine_coords(width: Coord, height: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Grid::new(width, height)?;
        for &coords in mine_coords {
            grid.place_mine(coords)?;
        }

        let mine_count = grid.mine_tile_count();
        if mine_count >= grid.total_tiles() {
            return Err(GameError::InvalidConfiguration);
        }
        let safe_left = grid.total_tiles() - mine_count;

        Ok(Self {
            grid,
            seed: 0,
            phase: GenerationPhase::Generated,
            mine_count,
            safe_left,
            flag_count: 0,
            flagged_mines: 0,
            result: Default::default(),
            triggered_mine: None,
        })
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn generation_phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn width(&self) -> Coord {
        self.grid.width()
    }

    pub fn height(&self) -> Coord {
        self.grid.height()
    }

    pub fn mine_count(&self) -> TileCount {
        self.mine_count
    }

    /// Non-mine tiles still hidden or flagged; the game is won at zero.
    pub fn safe_tiles_left(&self) -> TileCount {
        self.safe_left
    }

    /// How many mines have not been flagged yet. Goes negative when the
    /// player plants more flags than there are mines.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count as isize)
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile_view(&self, coords: Coord2) -> Result<TileView> {
        Ok(self.grid.tile_at(coords)?.into())
    }

    /// Applies one user interaction at `coords`.
    ///
    /// The single mutating entry point: validates the request, lazily places
    /// the mine layout on the first interaction (excluding `coords` from
    /// placement), then either toggles a flag or reveals. Requests after a
    /// terminal result fail with [`GameError::AlreadyEnded`].
    pub fn report(&mut self, coords: Coord2, requested: TileState) -> Result<ReportOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if matches!(requested, TileState::Hidden) {
            return Err(GameError::InvalidState);
        }

        self.check_not_final()?;

        if self.phase.is_pending() {
            self.generate_with(RejectionGenerator::new(self.seed, Some(coords)))?;
        }

        Ok(match requested {
            TileState::Flagged => self.toggle_flag(coords),
            _ => self.reveal_tile(coords),
        })
    }

    /// Places the layout produced by `generator`. Runs at most once per
    /// session; a second invocation fails with
    /// [`GameError::AlreadyGenerated`].
    pub fn generate_with<G: MinefieldGenerator>(&mut self, generator: G) -> Result<()> {
        if !self.phase.is_pending() {
            return Err(GameError::AlreadyGenerated);
        }

        for pos in generator.generate(self.grid.width(), self.grid.height(), self.mine_count) {
            self.grid.place_mine(pos)?;
        }
        self.phase = GenerationPhase::Generated;
        log::debug!("mine layout generated, {} mines placed", self.mine_count);
        Ok(())
    }

    /// Exposes the whole board for the presentation layer once the game is
    /// over. Counters and the result are left untouched.
    pub fn reveal_all(&mut self) {
        self.grid.reveal_all();
    }

    fn check_not_final(&self) -> Result<()> {
        if self.result.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn toggle_flag(&mut self, coords: Coord2) -> ReportOutcome {
        let is_mine = self.grid.tile(coords).is_mine();
        let tile = self.grid.tile_mut(coords);
        let before = tile.state();
        let after = tile.apply_state(TileState::Flagged);

        match (before, after) {
            (TileState::Hidden, TileState::Flagged) => {
                self.flag_count += 1;
                if is_mine {
                    self.flagged_mines += 1;
                }
            }
            (TileState::Flagged, TileState::Hidden) => {
                self.flag_count -= 1;
                if is_mine {
                    self.flagged_mines -= 1;
                }
            }
            // revealed tiles absorb the request
            _ => return ReportOutcome::Continue,
        }

        if self.all_mines_flagged() {
            self.finish(GameResult::Won);
            return ReportOutcome::Won;
        }
        ReportOutcome::Continue
    }

    /// Win-by-flags contract: every mine flagged and no flag wasted on a
    /// safe tile. Mine-free boards can only be won by revealing.
    fn all_mines_flagged(&self) -> bool {
        self.mine_count > 0
            && self.flagged_mines == self.mine_count
            && self.flag_count == self.mine_count
    }

    fn reveal_tile(&mut self, coords: Coord2) -> ReportOutcome {
        let tile = self.grid.tile(coords);

        match (tile.state(), tile.is_mine()) {
            (TileState::Hidden, true) => {
                self.triggered_mine = Some(coords);
                self.finish(GameResult::Lost);
                ReportOutcome::Lost
            }
            (TileState::Hidden, false) => {
                self.reveal_single(coords);
                log::debug!(
                    "revealed tile at {:?}, adjacent mines: {}",
                    coords,
                    tile.value()
                );

                if tile.value() == 0 {
                    self.flood_from(coords);
                }

                if self.safe_left == 0 {
                    self.finish(GameResult::Won);
                    ReportOutcome::Won
                } else {
                    ReportOutcome::Continue
                }
            }
            // flagged tiles are protected, revealed tiles are done
            _ => ReportOutcome::Continue,
        }
    }

    fn reveal_single(&mut self, coords: Coord2) {
        self.grid.tile_mut(coords).apply_state(TileState::Revealed);
        self.safe_left -= 1;
    }

    /// Iterative breadth-first expansion from a zero-count tile. Expansion
    /// only continues from zero tiles, whose neighbors can never be mines,
    /// so everything reached is safe to reveal.
    fn flood_from(&mut self, origin: Coord2) {
        let mut visited = HashSet::from([origin]);
        let mut to_visit: VecDeque<_> = self
            .grid
            .iter_neighbors(origin)
            .filter(|&pos| matches!(self.grid.tile(pos).state(), TileState::Hidden))
            .collect();
        log::trace!(
            "starting flood fill from {:?}, initial neighbors: {:?}",
            origin,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let tile = self.grid.tile(visit_coords);

            // skip flagged tiles and anything revealed meanwhile
            if !matches!(tile.state(), TileState::Hidden) {
                continue;
            }

            self.reveal_single(visit_coords);
            log::trace!(
                "flood revealed tile at {:?}, adjacent mines: {}",
                visit_coords,
                tile.value()
            );

            if tile.value() == 0 {
                let grid = &self.grid;
                to_visit.extend(
                    grid.iter_neighbors(visit_coords)
                        .filter(|&pos| matches!(grid.tile(pos).state(), TileState::Hidden))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn finish(&mut self, result: GameResult) {
        if self.result.is_final() {
            return;
        }

        self.result = result;
        if matches!(result, GameResult::Won) {
            self.triggered_mine = None;
        }
        log::debug!("game finished: {:?}", result);
    }
}
