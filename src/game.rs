use crate::{
    block::Block,
    difficulty::Difficulty,
    error::{Error, Result},
    generator,
    grid::{Grid, Position},
    history::{History, MoveRecord},
    outcome::{self, Notifier, Outcome, Outcomes},
    store::BlockStore,
};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum State {
    /// Grid and difficulty can still change; no board exists yet.
    #[default]
    Configuring,
    Active,
    Won,
    Lost,
}

impl State {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game of Minesweeper, from configuration to its outcome.
///
/// A game owns its board and is driven by a single caller: `play`, `visit`
/// and `flag` take `&mut self`, so sharing one between threads needs a lock
/// around it. The outcome is reported once through the [`Outcomes`] handed
/// out on creation, which can be moved to any thread.
#[derive(Debug)]
pub struct Game {
    grid: Grid,
    difficulty: Difficulty,
    seed: Option<u64>,
    state: State,
    store: Option<BlockStore>,
    history: History,
    notifier: Notifier,
}

impl Game {
    /// A game on the default 9x9 grid.
    pub fn new() -> (Self, Outcomes) {
        Self::with_grid(Grid::default())
    }

    pub fn with_grid(grid: Grid) -> (Self, Outcomes) {
        let (notifier, outcomes) = outcome::channel();
        let game = Self {
            grid,
            difficulty: Difficulty::default(),
            seed: None,
            state: State::default(),
            store: None,
            history: History::default(),
            notifier,
        };
        (game, outcomes)
    }

    /// A game already in play on a prepared board, e.g. one built with
    /// [`BlockStore::from_mines`]. A board with nothing left to clear is won
    /// right away.
    pub fn with_board(store: BlockStore) -> (Self, Outcomes) {
        let (mut game, outcomes) = Self::with_grid(store.grid());
        let cleared = store.cleared();
        game.store = Some(store);
        game.state = State::Active;
        if cleared {
            game.finish(Outcome::Win);
        }
        (game, outcomes)
    }

    pub fn set_grid(&mut self, width: usize, height: usize) -> Result<()> {
        self.check_configuring()?;
        self.grid = Grid::new(width, height)?;
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.check_configuring()?;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Makes mine placement reproducible. Boards are random otherwise.
    pub fn set_seed(&mut self, seed: u64) -> Result<()> {
        self.check_configuring()?;
        self.seed = Some(seed);
        Ok(())
    }

    /// Lays out the mines and starts accepting moves.
    pub fn play(&mut self) -> Result<()> {
        self.check_configuring()?;

        let ratio = self.difficulty.ratio();
        let store = match self.seed {
            Some(seed) => generator::generate(self.grid, ratio, &mut StdRng::seed_from_u64(seed)),
            None => generator::generate(self.grid, ratio, &mut rand::thread_rng()),
        };
        log::debug!(
            "starting {} game on a {} grid with {} mines",
            self.difficulty,
            self.grid,
            store.total_mines()
        );

        self.store = Some(store);
        self.state = State::Active;
        Ok(())
    }

    /// Reveals the block at `(x, y)` and returns every block uncovered by it.
    ///
    /// Flagged or already visited blocks give back an empty list. Stepping on
    /// a mine fails with [`Error::Exploded`], which carries the revealed mine.
    /// Moves stay accepted after the game ended, but the outcome is only ever
    /// reported once.
    pub fn visit(&mut self, x: usize, y: usize) -> Result<Vec<Block>> {
        let store = self.store.as_mut().ok_or(Error::GameNotStarted)?;

        match store.reveal(Position::new(x, y)) {
            Ok(revealed) => {
                if let Some(target) = revealed.first() {
                    self.history.record(target);
                    if store.cleared() {
                        self.finish(Outcome::Win);
                    }
                }
                Ok(revealed)
            }
            Err(err) => {
                if let Some(mine) = err.exploded_block() {
                    self.history.record(mine);
                    self.finish(Outcome::Lose);
                }
                Err(err)
            }
        }
    }

    /// Toggles the flag on the block at `(x, y)` and returns whether it is now
    /// flagged. Visited blocks cannot be flagged.
    pub fn flag(&mut self, x: usize, y: usize) -> Result<bool> {
        let store = self.store.as_mut().ok_or(Error::GameNotStarted)?;
        let block = store.get_mut(Position::new(x, y))?;
        if block.is_visited() {
            return Ok(false);
        }
        Ok(block.toggle_flag())
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.state != State::Active {
            return;
        }
        self.state = match outcome {
            Outcome::Win => State::Won,
            Outcome::Lose => State::Lost,
        };
        if self.notifier.notify(outcome) {
            log::info!("game over: {:?}", outcome);
        }
    }

    fn check_configuring(&self) -> Result<()> {
        match self.state {
            State::Configuring => Ok(()),
            _ => Err(Error::GameAlreadyStarted),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The board, once `play` has generated it.
    pub fn blocks(&self) -> Option<&BlockStore> {
        self.store.as_ref()
    }

    pub fn block(&self, x: usize, y: usize) -> Result<&Block> {
        self.store
            .as_ref()
            .ok_or(Error::GameNotStarted)?
            .get(Position::new(x, y))
    }

    /// Mine positions, ordered by x and then y. Empty before `play`.
    pub fn bomb_locations(&self) -> Vec<Position> {
        self.store
            .as_ref()
            .map(BlockStore::mine_locations)
            .unwrap_or_default()
    }

    /// Positions of numbered blocks, ordered by x and then y. Empty before `play`.
    pub fn hint_locations(&self) -> Vec<Position> {
        self.store
            .as_ref()
            .map(BlockStore::hint_locations)
            .unwrap_or_default()
    }

    /// Mines on the board, or the number that `play` will place.
    pub fn total_mines(&self) -> usize {
        match &self.store {
            Some(store) => store.total_mines(),
            None => self.difficulty.mine_count(self.grid),
        }
    }

    pub fn last_action(&self) -> Option<MoveRecord> {
        self.history.last_action()
    }
}
