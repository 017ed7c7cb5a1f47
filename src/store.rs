use crate::{
    block::{Block, Kind},
    error::Result,
    grid::{Grid, Position},
};
use bit_set::BitSet;
use std::ops::Index;

/// Every block of a board, addressed by position.
///
/// The store is the single owner of block state. It is filled in one go when
/// the mines are laid out; afterwards only reveals and flags mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStore {
    grid: Grid,
    blocks: Vec<Block>,
    mines: usize,
    // number of visited blocks that are not mines, allows checking a win in O(1)
    visited_safe: usize,
}

impl BlockStore {
    /// Builds a board from explicit mine positions and computes every hint.
    pub fn from_mines<I>(grid: Grid, mines: I) -> Result<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let mines = mines
            .into_iter()
            .map(|position| grid.check(position).map(|position| grid.index_of(position)))
            .collect::<Result<BitSet>>()?;
        Ok(Self::from_mine_set(grid, &mines))
    }

    /// `mines` holds storage indices, see [`Grid::positions`] for the order.
    pub(crate) fn from_mine_set(grid: Grid, mines: &BitSet) -> Self {
        let blocks = grid
            .positions()
            .enumerate()
            .map(|(i, location)| {
                let kind = if mines.contains(i) {
                    Kind::Mine
                } else {
                    // sum the number of adjacent blocks that are in the mine set
                    let adjacent_mines = grid
                        .neighbors(location)
                        .fold(0, |total, neighbor| {
                            total + u8::from(mines.contains(grid.index_of(neighbor)))
                        });
                    debug_assert!(adjacent_mines <= 8);
                    Kind::from_adjacent_mines(adjacent_mines)
                };
                Block::new(kind, location)
            })
            .collect::<Vec<_>>();

        Self {
            grid,
            mines: blocks.iter().filter(|block| block.kind().is_mine()).count(),
            blocks,
            visited_safe: 0,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn total_mines(&self) -> usize {
        self.mines
    }

    pub fn get(&self, position: Position) -> Result<&Block> {
        let position = self.grid.check(position)?;
        Ok(&self.blocks[self.grid.index_of(position)])
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Result<&mut Block> {
        let position = self.grid.check(position)?;
        let index = self.grid.index_of(position);
        Ok(&mut self.blocks[index])
    }

    /// All blocks, ordered by x and then by y.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// The blocks of one column.
    pub fn column(&self, x: usize) -> Option<&[Block]> {
        let height = self.grid.height();
        let start = x.checked_mul(height)?;
        let end = start.checked_add(height)?;
        self.blocks.get(start..end)
    }

    pub fn mine_locations(&self) -> Vec<Position> {
        self.locations(Kind::is_mine)
    }

    pub fn hint_locations(&self) -> Vec<Position> {
        self.locations(Kind::is_numbered)
    }

    fn locations(&self, predicate: impl Fn(&Kind) -> bool) -> Vec<Position> {
        self.blocks
            .iter()
            .filter(|block| predicate(&block.kind()))
            .map(Block::location)
            .collect()
    }

    pub fn remaining_safe_blocks(&self) -> usize {
        self.blocks.len() - self.mines - self.visited_safe
    }

    /// True once every block without a mine has been visited.
    pub fn cleared(&self) -> bool {
        self.remaining_safe_blocks() == 0
    }

    pub fn flagged_count(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_flagged()).count()
    }

    /// Marks the block visited. Returns `false` when it already was.
    pub(crate) fn visit(&mut self, position: Position) -> Result<bool> {
        let block = self.get_mut(position)?;
        if block.is_visited() {
            return Ok(false);
        }
        block.visit();
        if !block.kind().is_mine() {
            self.visited_safe += 1;
        }
        Ok(true)
    }
}

impl Index<Position> for BlockStore {
    type Output = Block;

    fn index(&self, position: Position) -> &Self::Output {
        assert!(
            self.grid.contains(position),
            "position {position} is outside of the {} grid",
            self.grid
        );
        &self.blocks[self.grid.index_of(position)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn store(width: usize, height: usize, mines: &[(usize, usize)]) -> BlockStore {
        let grid = Grid::new(width, height).unwrap();
        BlockStore::from_mines(grid, mines.iter().copied().map(Position::from)).unwrap()
    }

    #[test]
    fn hints_count_surrounding_mines() {
        let store = store(3, 3, &[(0, 0), (2, 0)]);

        assert_eq!(store[Position::new(1, 0)].kind(), Kind::Numbered(2));
        assert_eq!(store[Position::new(1, 1)].kind(), Kind::Numbered(2));
        assert_eq!(store[Position::new(0, 1)].kind(), Kind::Numbered(1));
        assert_eq!(store[Position::new(0, 2)].kind(), Kind::Empty);
        assert_eq!(store[Position::new(2, 2)].kind(), Kind::Empty);
        assert_eq!(store.total_mines(), 2);
    }

    #[test]
    fn locations_follow_storage_order() {
        let store = store(3, 2, &[(2, 1), (0, 1)]);

        assert_eq!(
            store.mine_locations(),
            vec![Position::new(0, 1), Position::new(2, 1)]
        );
        assert_eq!(
            store.hint_locations(),
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(2, 0)
            ]
        );
    }

    #[test]
    fn block_location_matches_its_index() {
        let store = store(4, 7, &[(1, 5), (3, 0)]);
        for position in store.grid().positions() {
            assert_eq!(store[position].location(), position);
        }
    }

    #[test]
    fn column_slices_one_x() {
        let store = store(3, 2, &[(1, 1)]);
        let column = store.column(1).unwrap();
        assert_eq!(column.len(), 2);
        assert_eq!(column[1].kind(), Kind::Mine);
        assert!(store.column(3).is_none());
    }

    #[test]
    fn column_far_past_the_grid_is_none() {
        let single = store(1, 1, &[]);
        assert!(single.column(usize::MAX).is_none());

        // x * height fits in a usize, the end of the column does not
        let tall = store(2, 3, &[]);
        assert!(tall.column(usize::MAX / 3).is_none());
    }

    #[test]
    fn rejects_mines_outside_the_grid() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            BlockStore::from_mines(grid, [Position::new(2, 0)]),
            Err(Error::OutOfBounds(Position::new(2, 0)))
        );
    }

    #[test]
    fn visiting_tracks_remaining_safe_blocks() {
        let mut store = store(2, 1, &[(0, 0)]);
        assert_eq!(store.remaining_safe_blocks(), 1);

        assert!(store.visit(Position::new(1, 0)).unwrap());
        assert!(!store.visit(Position::new(1, 0)).unwrap());
        assert!(store.cleared());

        assert!(store.visit(Position::new(0, 0)).unwrap());
        assert_eq!(store.remaining_safe_blocks(), 0);
    }
}
