use crate::{
    block::{Block, Kind},
    grid::Position,
};

/// How the target block of a reveal was classified.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Empty,
    Number,
    Mine,
}

impl From<Kind> for Action {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Empty => Self::Empty,
            Kind::Numbered(_) => Self::Number,
            Kind::Mine => Self::Mine,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub position: Position,
    pub action: Action,
}

impl From<&Block> for MoveRecord {
    fn from(block: &Block) -> Self {
        Self {
            position: block.location(),
            action: block.kind().into(),
        }
    }
}

/// Keeps the most recent successful reveal.
#[derive(Debug, Clone, Default)]
pub struct History {
    last: Option<MoveRecord>,
}

impl History {
    /// Records the block a reveal was aimed at. Only the target counts, not
    /// the blocks a flood fill opened around it.
    pub(crate) fn record(&mut self, target: &Block) {
        self.last = Some(target.into());
    }

    pub fn last_action(&self) -> Option<MoveRecord> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_a_record() {
        assert_eq!(History::default().last_action(), None);
    }

    #[test]
    fn newer_reveals_overwrite_older_ones() {
        let mut history = History::default();
        history.record(&Block::new(Kind::Empty, Position::new(0, 0)));
        history.record(&Block::new(Kind::Numbered(2), Position::new(3, 6)));

        assert_eq!(
            history.last_action(),
            Some(MoveRecord {
                position: Position::new(3, 6),
                action: Action::Number,
            })
        );
    }
}
