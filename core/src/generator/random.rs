use std::collections::HashSet;

use super::*;

/// Rejection-sampling generator: draws uniformly random coordinates and
/// retries on collision with an already chosen cell or with the excluded
/// cell. Termination is guaranteed whenever the requested mine count is
/// below the number of placeable tiles, which the session's ratio bound
/// already enforces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RejectionGenerator {
    seed: u64,
    excluded: Option<Coord2>,
}

impl RejectionGenerator {
    /// `excluded` is the cell the player is about to interact with; it never
    /// receives a mine, so a first reveal cannot detonate.
    pub fn new(seed: u64, excluded: Option<Coord2>) -> Self {
        Self { seed, excluded }
    }
}

impl MinefieldGenerator for RejectionGenerator {
    fn generate(self, width: Coord, height: Coord, mines: TileCount) -> Vec<Coord2> {
        use rand::prelude::*;

        let placeable = mult(width, height) - TileCount::from(self.excluded.is_some());
        let mines = if mines > placeable {
            log::warn!("cannot place {mines} mines on {placeable} placeable tiles, capping");
            placeable
        } else {
            mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut chosen = HashSet::new();
        let mut coords = Vec::with_capacity(usize::from(mines));

        while coords.len() < usize::from(mines) {
            let pos: Coord2 = (rng.random_range(0..height), rng.random_range(0..width));

            if Some(pos) == self.excluded || !chosen.insert(pos) {
                continue;
            }
            coords.push(pos);
        }

        coords
    }
}
