use crate::{
    block::{Block, Kind},
    error::{Error, Result},
    grid::Position,
    store::BlockStore,
};
use bit_set::BitSet;
use std::collections::VecDeque;

impl BlockStore {
    /// Reveals the block at `origin` and returns every block this call
    /// uncovered, in breadth-first order starting with `origin`.
    ///
    /// Visited and flagged blocks are left alone and yield an empty list.
    /// A mine is marked visited and reported as [`Error::Exploded`]. An empty
    /// block opens its whole empty region together with the numbered blocks
    /// bordering it; numbered blocks stop the expansion and mines are never
    /// reached by it.
    pub(crate) fn reveal(&mut self, origin: Position) -> Result<Vec<Block>> {
        let block = *self.get(origin)?;
        if !block.is_concealed() {
            return Ok(Vec::new());
        }

        match block.kind() {
            Kind::Mine => {
                self.visit(origin)?;
                Err(Error::Exploded {
                    position: origin,
                    block: self[origin],
                })
            }
            Kind::Numbered(_) => {
                self.visit(origin)?;
                Ok(vec![self[origin]])
            }
            Kind::Empty => self.flood(origin),
        }
    }

    fn flood(&mut self, origin: Position) -> Result<Vec<Block>> {
        let grid = self.grid();
        let mut revealed = Vec::new();

        // positions already queued, so cyclic open regions are walked once
        let mut seen = [grid.index_of(origin)].into_iter().collect::<BitSet>();
        let mut positions = [origin].into_iter().collect::<VecDeque<_>>();

        while let Some(position) = positions.pop_front() {
            if !self.visit(position)? {
                continue;
            }
            let block = self[position];
            revealed.push(block);

            if block.kind().is_empty() {
                for neighbor in grid.neighbors(position) {
                    let next = &self[neighbor];
                    if next.is_concealed()
                        && !next.kind().is_mine()
                        && seen.insert(grid.index_of(neighbor))
                    {
                        positions.push_back(neighbor);
                    }
                }
            }
        }

        log::debug!(
            "flood from {} revealed {} blocks",
            origin,
            revealed.len()
        );
        Ok(revealed)
    }
}
