use crate::grid::Position;

/// What a block holds. Set by the generator and never changed afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// No mine here and none around it; revealing it opens the surrounding region.
    Empty,
    /// No mine here, but the given number of mines (1 to 8) around it.
    Numbered(u8),
    Mine,
}

impl Kind {
    pub(crate) fn from_adjacent_mines(adjacent_mines: u8) -> Self {
        match adjacent_mines {
            0 => Self::Empty,
            count => Self::Numbered(count),
        }
    }

    pub fn is_mine(&self) -> bool {
        matches!(self, Self::Mine)
    }

    pub fn is_numbered(&self) -> bool {
        matches!(self, Self::Numbered(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Block {
    kind: Kind,
    location: Position,
    visited: bool,
    flagged: bool,
}

impl Block {
    pub(crate) fn new(kind: Kind, location: Position) -> Self {
        Self {
            kind,
            location,
            visited: false,
            flagged: false,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The number of mines around this block; zero for empty blocks and mines.
    pub fn value(&self) -> u8 {
        match self.kind {
            Kind::Numbered(count) => count,
            Kind::Empty | Kind::Mine => 0,
        }
    }

    pub fn location(&self) -> Position {
        self.location
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Whether a reveal on this block would do anything.
    pub fn is_concealed(&self) -> bool {
        !(self.visited || self.flagged)
    }

    pub(crate) fn visit(&mut self) {
        self.visited = true;
    }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.flagged = !self.flagged;
        self.flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_adjacent_mines_is_empty() {
        assert_eq!(Kind::from_adjacent_mines(0), Kind::Empty);
        assert_eq!(Kind::from_adjacent_mines(3), Kind::Numbered(3));
    }

    #[test]
    fn value_only_counts_for_numbered_blocks() {
        let origin = Position::new(0, 0);
        assert_eq!(Block::new(Kind::Numbered(2), origin).value(), 2);
        assert_eq!(Block::new(Kind::Empty, origin).value(), 0);
        assert_eq!(Block::new(Kind::Mine, origin).value(), 0);
    }

    #[test]
    fn flag_toggles_and_hides_block_from_reveals() {
        let mut block = Block::new(Kind::Mine, Position::new(2, 3));
        assert!(block.is_concealed());
        assert!(block.toggle_flag());
        assert!(!block.is_concealed());
        assert!(!block.toggle_flag());
        assert!(block.is_concealed());
    }
}
