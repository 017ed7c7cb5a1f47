use anyhow::{Context, Result};
use minesweeper::{Difficulty, Game, Grid};
use structopt::StructOpt;

mod events;
mod ui;

#[derive(Debug, structopt::StructOpt)]
struct Opt {
    /// The number of columns in the grid.
    #[structopt(short, long, default_value = "9")]
    width: usize,

    /// The number of rows in the grid.
    #[structopt(short = "-H", long, default_value = "9")]
    height: usize,

    /// How densely mines are packed: easy, medium or hard.
    #[structopt(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Seed for mine placement, for replaying the same board.
    #[structopt(short, long)]
    seed: Option<u64>,

    /// The width of each cell.
    #[structopt(short = "-c", long, default_value = "5")]
    cell_width: usize,

    /// The height of each cell.
    #[structopt(short = "-C", long, default_value = "3")]
    cell_height: usize,
}

fn main() -> Result<()> {
    let Opt {
        width,
        height,
        difficulty,
        seed,
        cell_width,
        cell_height,
    } = Opt::from_args();

    let grid = Grid::new(width, height).context("invalid grid size")?;
    let (mut game, outcomes) = Game::with_grid(grid);
    game.set_difficulty(difficulty)
        .context("failed to set difficulty")?;
    if let Some(seed) = seed {
        game.set_seed(seed).context("failed to set seed")?;
    }
    game.play().context("failed to start game")?;

    ui::Ui::builder()
        .game(game)
        .outcomes(outcomes)
        .cell_width(cell_width)
        .cell_height(cell_height)
        .build()
        .run()
        .context("sweep failed")
}
