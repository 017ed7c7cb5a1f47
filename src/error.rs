use crate::{block::Block, grid::Position};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("game already started, the board can no longer be configured")]
    GameAlreadyStarted,

    #[error("game has not started yet, call play first")]
    GameNotStarted,

    #[error("Game over at X={} Y={}", .position.x, .position.y)]
    Exploded { position: Position, block: Block },

    #[error("position out of bounds: {0}")]
    OutOfBounds(Position),

    #[error("grid must be at least 1x1, got {width}x{height}")]
    InvalidGrid { width: usize, height: usize },
}

impl Error {
    /// The mine that went off, if this is a detonation.
    pub fn exploded_block(&self) -> Option<&Block> {
        match self {
            Self::Exploded { block, .. } => Some(block),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
