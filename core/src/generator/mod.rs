use crate::*;
pub use random::*;

mod random;

/// Strategy producing the mined coordinates for a fresh session.
///
/// Implementations must return distinct in-bounds coordinates; the session
/// applies them to its grid in one shot.
pub trait MinefieldGenerator {
    fn generate(self, width: Coord, height: Coord, mines: TileCount) -> Vec<Coord2>;
}
