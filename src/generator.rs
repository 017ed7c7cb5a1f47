use crate::{difficulty, grid::Grid, store::BlockStore};
use bit_set::BitSet;
use rand::Rng;

/// Lays `floor(area * ratio)` mines on a fresh board and computes the hints.
///
/// Mine positions are drawn uniformly without replacement, so no block ever
/// receives two mines and the count can never exceed the number of blocks.
pub fn generate<R>(grid: Grid, ratio: f64, rng: &mut R) -> BlockStore
where
    R: Rng + ?Sized,
{
    let area = grid.area();
    let mines = difficulty::mine_count(grid, ratio);
    if ratio > 1.0 {
        log::warn!(
            "mine ratio {} does not fit a {} grid, placing {} mines instead",
            ratio,
            grid,
            mines
        );
    }

    let samples = rand::seq::index::sample(rng, area, mines)
        .into_iter()
        .collect::<BitSet>();
    log::debug!("placed {} mines on a {} grid", samples.len(), grid);

    BlockStore::from_mine_set(grid, &samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{block::Kind, difficulty::Difficulty, grid::Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn places_exact_mine_count() {
        for (width, height) in [(1, 1), (3, 7), (10, 40), (16, 16), (30, 1)] {
            let grid = Grid::new(width, height).unwrap();
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                let store = generate(grid, difficulty.ratio(), &mut rng(7));
                let counted = store.iter().filter(|block| block.kind().is_mine()).count();
                assert_eq!(counted, difficulty.mine_count(grid), "{grid} {difficulty}");
                assert_eq!(store.total_mines(), counted);
            }
        }
    }

    #[test]
    fn full_ratio_mines_every_block() {
        let grid = Grid::new(4, 3).unwrap();
        let store = generate(grid, 1.0, &mut rng(1));
        assert!(store.iter().all(|block| block.kind() == Kind::Mine));

        let store = generate(grid, 3.0, &mut rng(1));
        assert_eq!(store.total_mines(), grid.area());
    }

    #[test]
    fn hints_match_neighboring_mines() {
        let grid = Grid::new(10, 40).unwrap();
        let store = generate(grid, Difficulty::Hard.ratio(), &mut rng(42));

        for block in store.iter() {
            let around = grid
                .neighbors(block.location())
                .filter(|&neighbor| store[neighbor].kind().is_mine())
                .count();
            match block.kind() {
                Kind::Mine => {}
                Kind::Empty => assert_eq!(around, 0, "{}", block.location()),
                Kind::Numbered(value) => {
                    assert!(value >= 1);
                    assert_eq!(usize::from(value), around, "{}", block.location());
                }
            }
        }
    }

    #[test]
    fn mine_and_hint_locations_are_disjoint() {
        let grid = Grid::new(10, 40).unwrap();
        let store = generate(grid, Difficulty::Medium.ratio(), &mut rng(3));
        let mines = store.mine_locations();
        let hints = store.hint_locations();

        assert!(!mines.is_empty());
        assert!(!hints.is_empty());
        assert!(hints.iter().all(|hint| !mines.contains(hint)));
    }

    #[test]
    fn same_seed_same_board() {
        let grid = Grid::new(12, 9).unwrap();
        let first = generate(grid, 0.2, &mut rng(99));
        let second = generate(grid, 0.2, &mut rng(99));
        assert_eq!(first, second);
        assert!(!first[Position::new(0, 0)].is_visited());
    }
}
