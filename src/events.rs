use minesweeper::{Outcome, Outcomes};
use std::{io, sync::mpsc, thread, time::Duration};
use termion::{event::Key, input::TermRead};

pub(crate) enum Event<I> {
    Input(I),
    Tick,
    Outcome(Outcome),
}

type Sender = mpsc::Sender<Event<Key>>;

/// Merges key presses, ticks and the game outcome into one stream. Each
/// source runs on its own thread and feeds a common `Receiver`.
pub(crate) struct Events {
    rx: mpsc::Receiver<Event<Key>>,
    _handles: [thread::JoinHandle<()>; 3],
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Config {
    pub(crate) tick_rate: Duration,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate: Duration::from_millis(250),
        }
    }
}

fn spawn_input(tx: Sender) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for key in io::stdin().keys().flatten() {
            if let Err(err) = tx.send(Event::Input(key)) {
                log::error!("{}", err);
                return;
            }
        }
    })
}

fn spawn_ticks(tx: Sender, tick_rate: Duration) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while tx.send(Event::Tick).is_ok() {
            thread::sleep(tick_rate);
        }
    })
}

// the game hangs up after its single outcome, so this thread always ends
fn spawn_outcome(tx: Sender, outcomes: Outcomes) -> thread::JoinHandle<()> {
    thread::spawn(move || match outcomes.recv() {
        Ok(outcome) => {
            if let Err(err) = tx.send(Event::Outcome(outcome)) {
                log::debug!("{}", err);
            }
        }
        Err(_) => log::debug!("game dropped before it ended"),
    })
}

impl Events {
    pub(crate) fn new(outcomes: Outcomes) -> Self {
        Self::with_config(Config::default(), outcomes)
    }

    pub(crate) fn with_config(config: Config, outcomes: Outcomes) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rx,
            _handles: [
                spawn_input(tx.clone()),
                spawn_outcome(tx.clone(), outcomes),
                spawn_ticks(tx, config.tick_rate),
            ],
        }
    }

    pub(crate) fn next(&self) -> Result<Event<Key>, mpsc::RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweeper::{BlockStore, Game, Grid, Position};

    fn won_game() -> (Game, Outcomes) {
        let grid = Grid::new(1, 1).unwrap();
        let store = BlockStore::from_mines(grid, [Position::new(0, 0)]).unwrap();
        Game::with_board(store)
    }

    #[test]
    fn outcome_is_forwarded() {
        let (_game, outcomes) = won_game();
        let (tx, rx) = mpsc::channel();

        spawn_outcome(tx, outcomes).join().unwrap();

        assert!(matches!(rx.recv(), Ok(Event::Outcome(Outcome::Win))));
    }

    #[test]
    fn outcome_thread_ends_when_the_ui_is_gone() {
        let (_game, outcomes) = won_game();
        let (tx, rx) = mpsc::channel();
        drop(rx);

        assert!(spawn_outcome(tx, outcomes).join().is_ok());
    }

    #[test]
    fn outcome_thread_ends_when_the_game_is_dropped() {
        let (game, outcomes) = Game::new();
        drop(game);
        let (tx, rx) = mpsc::channel();

        assert!(spawn_outcome(tx, outcomes).join().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
