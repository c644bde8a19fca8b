use serde::{Deserialize, Serialize};

/// Sentinel tile value marking a mine. Regular tiles carry a non-negative
/// adjacent-mine count instead.
pub const MINE: i8 = -1;

/// Visibility state of a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Flagged,
    Revealed,
}

impl TileState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    /// Pure transition function from the current state and a requested state.
    ///
    /// `Revealed` is terminal and absorbs every request; flagging an already
    /// flagged tile toggles it back to `Hidden`. Total over all nine pairs so
    /// the whole table is testable.
    pub(crate) const fn transition(self, requested: TileState) -> TileState {
        use TileState::*;

        match (self, requested) {
            (Revealed, Hidden) => Revealed,
            (Revealed, Flagged) => Revealed,
            (Revealed, Revealed) => Revealed,
            (Flagged, Hidden) => Hidden,
            (Flagged, Flagged) => Hidden,
            (Flagged, Revealed) => Revealed,
            (Hidden, Hidden) => Hidden,
            (Hidden, Flagged) => Flagged,
            (Hidden, Revealed) => Revealed,
        }
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One grid cell: an adjacency value (or [`MINE`]) plus a visibility state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    value: i8,
    state: TileState,
}

impl Tile {
    pub const fn value(self) -> i8 {
        self.value
    }

    pub const fn state(self) -> TileState {
        self.state
    }

    pub const fn is_mine(self) -> bool {
        self.value == MINE
    }

    /// Turns the tile into a mine. Idempotent, a mine stays a mine.
    pub(crate) fn set_mine(&mut self) {
        self.value = MINE;
    }

    /// Bumps the adjacency count. Mines never carry a count, so the increment
    /// is silently ignored for them.
    pub(crate) fn increment_adjacency(&mut self) {
        if !self.is_mine() {
            self.value += 1;
        }
    }

    /// Runs the state through the transition table, returning the new state.
    pub(crate) fn apply_state(&mut self, requested: TileState) -> TileState {
        self.state = self.state.transition(requested);
        self.state
    }
}

/// Player-visible projection of a tile, as consumed by a presentation layer
/// to pick glyphs and colors. A revealed mine shows up as `Revealed(MINE)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Revealed(i8),
}

impl From<Tile> for TileView {
    fn from(tile: Tile) -> Self {
        match tile.state() {
            TileState::Hidden => Self::Hidden,
            TileState::Flagged => Self::Flagged,
            TileState::Revealed => Self::Revealed(tile.value()),
        }
    }
}
