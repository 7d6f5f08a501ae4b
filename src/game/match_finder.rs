use itertools::Itertools;

use crate::model::{MatchRun, TileMatrix, TileTypeId};

/// Shortest run that counts as a match.
pub const MIN_RUN_LENGTH: usize = 3;

/// Match detection contract. Implementations must be deterministic for a
/// given matrix: no hidden randomness, and a consistent tie-break from call
/// to call on an unchanged matrix — the cascade loop's termination argument
/// relies on it.
pub trait MatchFinder {
    fn find_best_match(&self, matrix: &TileMatrix) -> Option<MatchRun>;
}

/// Default finder: scans every row, then every column, for the longest
/// straight run of one type. Ties keep the earliest run in scan order
/// (rows top-to-bottom, then columns left-to-right).
#[derive(Debug, Default)]
pub struct RunScanner;

fn best_in_line<I>(cells: I) -> Option<MatchRun>
where
    I: Iterator<Item = ((usize, usize), TileTypeId)>,
{
    let mut best: Option<MatchRun> = None;
    for (type_id, chunk) in &cells.chunk_by(|&(_, type_id)| type_id) {
        let tiles: Vec<(usize, usize)> = chunk.map(|(position, _)| position).collect();
        if tiles.len() < MIN_RUN_LENGTH {
            continue;
        }
        if best.as_ref().map_or(true, |run| tiles.len() > run.len()) {
            best = Some(MatchRun::new(type_id, tiles));
        }
    }
    best
}

fn keep_longer(best: &mut Option<MatchRun>, candidate: Option<MatchRun>) {
    if let Some(run) = candidate {
        if best.as_ref().map_or(true, |current| run.len() > current.len()) {
            *best = Some(run);
        }
    }
}

impl MatchFinder for RunScanner {
    fn find_best_match(&self, matrix: &TileMatrix) -> Option<MatchRun> {
        let mut best: Option<MatchRun> = None;

        for y in 0..matrix.height() {
            let row = (0..matrix.width()).map(|x| ((x, y), matrix.get(x, y)));
            keep_longer(&mut best, best_in_line(row));
        }
        for x in 0..matrix.width() {
            let column = (0..matrix.height()).map(|y| ((x, y), matrix.get(x, y)));
            keep_longer(&mut best, best_in_line(column));
        }

        best
    }
}
