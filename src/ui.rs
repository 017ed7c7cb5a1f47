use crate::events::{Event, Events};
use error::Error;
use minesweeper::{Action, Game, Kind, MoveRecord, Outcome, Outcomes};
use num_traits::ToPrimitive;
use ratatui::{
    backend::TermionBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::{
    fmt, io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use termion::{event::Key, input::MouseTerminal, raw::IntoRawMode, screen::IntoAlternateScreen};

mod error;

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let Rect {
        width: grid_width,
        height: grid_height,
        ..
    } = r;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((grid_height / 2).saturating_sub(height / 2)),
                Constraint::Length(height),
                Constraint::Length((grid_height / 2).saturating_sub(height / 2)),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Length((grid_width / 2).saturating_sub(width / 2)),
                Constraint::Length(width),
                Constraint::Length((grid_width / 2).saturating_sub(width / 2)),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

fn align_strings_to_char(strings: &[&str], c: char) -> Vec<String> {
    let (firsts, rests): (Vec<_>, Vec<_>) = strings
        .iter()
        .map(|&s| s.split_at(s.find(c).unwrap_or(s.len())))
        .unzip();
    let max_firsts = firsts.iter().map(|&f| f.len()).max().unwrap_or(0);
    let max_rests = rests.iter().map(|&r| r.len()).max().unwrap_or(0);
    firsts
        .into_iter()
        .zip(rests)
        .map(|(first, rest)| format!("{first:>max_firsts$}{rest:<max_rests$}"))
        .collect()
}

fn describe(record: Option<MoveRecord>) -> String {
    match record {
        None => "last move: none".to_owned(),
        Some(MoveRecord { position, action }) => {
            let action = match action {
                Action::Empty => "opened",
                Action::Number => "hint",
                Action::Mine => "mine",
            };
            format!("last move: {action} {position}")
        }
    }
}

#[derive(typed_builder::TypedBuilder)]
pub(crate) struct Ui {
    game: Game,
    outcomes: Outcomes,
    cell_width: usize,
    cell_height: usize,
}

const BOMB: &str = "💣";
const FLAG: &str = "⛳";

struct App {
    game: Game,
    outcome: Option<Outcome>,
    active_x: usize,
    active_y: usize,
}

struct Cell {
    block: minesweeper::Block,
    active: bool,
    lost: bool,
}

impl Cell {
    fn is_active(&self) -> bool {
        self.active
    }

    fn is_exposed(&self) -> bool {
        self.block.is_visited()
    }

    fn is_flagged(&self) -> bool {
        self.block.is_flagged()
    }

    fn is_mine(&self) -> bool {
        self.block.kind().is_mine()
    }

    fn block(&self) -> Block {
        Block::default()
            .borders(Borders::ALL)
            .style(
                Style::default()
                    .bg(Color::Black)
                    .fg(if self.is_active() {
                        Color::Cyan
                    } else if self.lost && self.is_mine() {
                        Color::LightRed
                    } else {
                        Color::White
                    })
                    .add_modifier(if self.is_active() {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            )
            .border_type(BorderType::Rounded)
    }

    fn text_style(&self) -> Style {
        Style::default()
            .fg(if self.is_exposed() && self.is_mine() {
                Color::LightYellow
            } else if self.is_exposed() {
                Color::White
            } else {
                Color::Black
            })
            .bg(if self.is_exposed() {
                Color::Black
            } else if self.is_active() {
                Color::Cyan
            } else {
                Color::White
            })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block.kind() {
            _ if self.is_flagged() => f.write_str(FLAG),
            // every mine is shown once the game is lost
            Kind::Mine if self.is_exposed() || self.lost => f.write_str(BOMB),
            Kind::Numbered(value) if self.is_exposed() => write!(f, "{value}"),
            _ => f.write_str(" "),
        }
    }
}

impl App {
    fn new(game: Game) -> Self {
        Self {
            game,
            outcome: None,
            active_x: 0,
            active_y: 0,
        }
    }

    fn up(&mut self) {
        if let Some(active_y) = self.active_y.checked_sub(1) {
            self.active_y = active_y;
        }
    }

    fn down(&mut self) {
        self.active_y += usize::from(self.active_y < self.game.grid().height() - 1);
    }

    fn left(&mut self) {
        if let Some(active_x) = self.active_x.checked_sub(1) {
            self.active_x = active_x;
        }
    }

    fn right(&mut self) {
        self.active_x += usize::from(self.active_x < self.game.grid().width() - 1);
    }

    fn lost(&self) -> bool {
        self.outcome == Some(Outcome::Lose)
    }

    fn playing(&self) -> bool {
        !self.game.state().is_finished()
    }

    fn cell(&self, x: usize, y: usize) -> Result<Cell, Error> {
        Ok(Cell {
            block: *self.game.block(x, y)?,
            active: (x, y) == (self.active_x, self.active_y),
            lost: self.lost(),
        })
    }

    fn visit_active_cell(&mut self) -> Result<(), Error> {
        match self.game.visit(self.active_x, self.active_y) {
            // the loss itself arrives through the outcome channel
            Ok(_) | Err(minesweeper::Error::Exploded { .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn flag_active_cell(&mut self) -> Result<(), Error> {
        self.game.flag(self.active_x, self.active_y)?;
        Ok(())
    }

    fn available_flags(&self) -> usize {
        let flagged = self
            .game
            .blocks()
            .map_or(0, minesweeper::BlockStore::flagged_count);
        self.game.total_mines().saturating_sub(flagged)
    }
}

/// Everything a frame shows, read from the game before drawing.
struct Snapshot {
    board: Vec<Vec<Cell>>,
    mines: usize,
    available_flags: usize,
    last_move: String,
    outcome: Option<Outcome>,
}

impl Snapshot {
    fn take(app: &App) -> Result<Self, Error> {
        let grid = app.game.grid();
        let board = (0..grid.height())
            .map(|y| {
                (0..grid.width())
                    .map(|x| app.cell(x, y))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            board,
            mines: app.game.total_mines(),
            available_flags: app.available_flags(),
            last_move: describe(app.game.last_action()),
            outcome: app.outcome,
        })
    }

    fn flag_ratio(&self) -> f64 {
        if self.mines == 0 {
            return 0.0;
        }
        (self.available_flags.to_f64().unwrap_or_default() / self.mines.to_f64().unwrap_or(1.0))
            .clamp(0.0, 1.0)
    }
}

/// Cell sizes and the board extent in terminal units.
struct Geometry {
    cell_width: usize,
    cell_height: usize,
    board_width: u16,
    board_height: u16,
    row_constraints: Vec<Constraint>,
    col_constraints: Vec<Constraint>,
}

impl Geometry {
    const PADDING: usize = 1;

    fn new(
        cell_width: usize,
        cell_height: usize,
        rows: usize,
        columns: usize,
    ) -> Result<Self, Error> {
        let to_u16 = |value: usize| u16::try_from(value).map_err(Error::ConvertUsizeToU16);
        Ok(Self {
            cell_width,
            cell_height,
            board_width: to_u16(cell_width * columns + 2 * Self::PADDING)?,
            board_height: to_u16(cell_height * rows + 2 * Self::PADDING)?,
            row_constraints: vec![Constraint::Length(to_u16(cell_height)?); rows],
            col_constraints: vec![Constraint::Length(to_u16(cell_width)?); columns],
        })
    }

    /// Text of one cell, vertically centred between its borders.
    fn cell_text(&self, cell: &Cell) -> String {
        let line = format!(
            "{:^length$}",
            cell.to_string(),
            length = self.cell_width.saturating_sub(2)
        );
        // the text line plus the top and bottom border are never padding
        let pad_lines = self.cell_height.saturating_sub(3) / 2;
        let pad_line = " ".repeat(self.cell_width);

        std::iter::repeat(pad_line.clone())
            .take(pad_lines)
            .chain(std::iter::once(line))
            .chain(std::iter::repeat(pad_line).take(pad_lines))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Where each part of the screen goes.
struct Areas {
    flags: Rect,
    mines: Rect,
    board: Rect,
    help: Rect,
}

impl Areas {
    fn split(screen: Rect, geometry: &Geometry) -> Self {
        let inner = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(1)
            .horizontal_margin(1)
            .constraints([Constraint::Min(geometry.board_height)])
            .split(screen)[0];

        let side_width = screen
            .width
            .checked_sub(geometry.board_width)
            .unwrap_or(screen.width)
            / 2;
        let column = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(side_width),
                Constraint::Length(geometry.board_width),
                // the layout solver leaves the right side a little short
                Constraint::Min(side_width.saturating_sub(1)),
            ])
            .split(inner)[1];

        let side_height = inner
            .height
            .checked_sub(geometry.board_height)
            .unwrap_or(inner.height)
            / 2;
        let stacked = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(side_height),
                Constraint::Length(geometry.board_height),
                Constraint::Min(side_height),
            ])
            .split(column);

        let counters = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(side_height.saturating_sub(3)),
                Constraint::Length(3),
            ])
            .split(stacked[0])[1];
        let counters = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(counters);

        Self {
            flags: counters[0],
            mines: counters[1],
            board: stacked[1],
            help: stacked[2],
        }
    }
}

fn titled(symbol: &'static str, color: Color) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(Span::styled(
        symbol,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn draw(frame: &mut Frame, geometry: &Geometry, snapshot: &Snapshot) {
    let screen = frame.size();
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                "Minesweeper",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .border_type(BorderType::Rounded),
        screen,
    );

    let areas = Areas::split(screen, geometry);
    draw_counters(frame, &areas, snapshot);
    draw_help(frame, &areas, geometry, snapshot);
    draw_board(frame, &areas, geometry, snapshot);
    if let Some(outcome) = snapshot.outcome {
        draw_banner(frame, areas.board, outcome);
    }
}

fn draw_counters(frame: &mut Frame, areas: &Areas, snapshot: &Snapshot) {
    let available_flags = snapshot.available_flags;
    let digits = available_flags
        .to_f64()
        .unwrap_or_default()
        .log10()
        .ceil()
        .to_usize()
        .unwrap_or(0)
        + 1;
    let flags = Gauge::default()
        .block(titled(FLAG, Color::LightMagenta))
        .gauge_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("{available_flags:>digits$}"))
        .ratio(snapshot.flag_ratio());
    frame.render_widget(flags, areas.flags);

    let mines = Paragraph::new(snapshot.mines.to_string())
        .block(titled(BOMB, Color::LightYellow))
        .alignment(Alignment::Center);
    frame.render_widget(mines, areas.mines);
}

fn draw_help(frame: &mut Frame, areas: &Areas, geometry: &Geometry, snapshot: &Snapshot) {
    let width = usize::from(geometry.board_width);
    let lines = align_strings_to_char(
        &[
            "movement: hjkl / ← ↓ ↑ →",
            "reveal block: spacebar",
            "flag block: f",
            "quit: q",
        ],
        ':',
    )
    .into_iter()
    .chain(std::iter::once(snapshot.last_move.clone()))
    .map(|line| ListItem::new(format!("{line:^width$}")))
    .collect::<Vec<_>>();

    frame.render_widget(
        List::new(lines).block(Block::default().borders(Borders::NONE)),
        areas.help,
    );
}

fn draw_board(frame: &mut Frame, areas: &Areas, geometry: &Geometry, snapshot: &Snapshot) {
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
        areas.board,
    );

    let row_rects = Layout::default()
        .direction(Direction::Vertical)
        .vertical_margin(1)
        .constraints(geometry.row_constraints.clone())
        .split(areas.board);

    for (row_rect, row) in row_rects.iter().zip(&snapshot.board) {
        let cell_rects = Layout::default()
            .direction(Direction::Horizontal)
            .horizontal_margin(1)
            .constraints(geometry.col_constraints.clone())
            .split(*row_rect);

        for (cell_rect, cell) in cell_rects.iter().zip(row) {
            let text = Paragraph::new(geometry.cell_text(cell))
                .block(cell.block())
                .style(cell.text_style());
            frame.render_widget(text, *cell_rect);
        }
    }
}

fn draw_banner(frame: &mut Frame, board: Rect, outcome: Outcome) {
    let (text, color) = match outcome {
        Outcome::Win => ("You won!", Color::LightGreen),
        Outcome::Lose => ("You lose!", Color::Magenta),
    };
    let area = centered_rect(20, 3, board);
    frame.render_widget(Clear, area); // this clears out the background
    frame.render_widget(
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center),
        area,
    );
}

impl Ui {
    pub(crate) fn run(self) -> Result<(), Error> {
        let Self {
            game,
            outcomes,
            cell_width,
            cell_height,
        } = self;
        let grid = game.grid();
        let geometry = Geometry::new(cell_width, cell_height, grid.height(), grid.width())?;
        let events = Events::new(outcomes);

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        ctrlc::set_handler(move || {
            running_clone.store(false, Ordering::SeqCst);
        })
        .map_err(Error::SetHandler)?;

        let mut app = App::new(game);

        let stdout = io::stdout()
            .into_raw_mode()
            .map_err(Error::GetStdoutInRawMode)?
            .into_alternate_screen()
            .map_err(Error::GetAlternateScreenForMouseTerminal)?;
        let mouse_terminal = MouseTerminal::from(stdout);
        let backend = TermionBackend::new(mouse_terminal);
        let mut terminal = Terminal::new(backend).map_err(Error::CreateTerminal)?;

        while running.load(Ordering::SeqCst) {
            let snapshot = Snapshot::take(&app)?;
            terminal
                .draw(|frame| draw(frame, &geometry, &snapshot))
                .map_err(Error::DrawToTerminal)?;

            match events.next().map_err(Error::GetEvent)? {
                Event::Input(key) => match key {
                    // movement using arrow keys or vim movement keys
                    Key::Up | Key::Char('k') => app.up(),
                    Key::Down | Key::Char('j') => app.down(),
                    Key::Left | Key::Char('h') => app.left(),
                    Key::Right | Key::Char('l') => app.right(),
                    Key::Char('f') if app.playing() => app.flag_active_cell()?,
                    Key::Char(' ') if app.playing() => app.visit_active_cell()?,
                    Key::Char('q') => break,
                    _ => {}
                },
                Event::Outcome(outcome) => app.outcome = Some(outcome),
                Event::Tick => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweeper::{BlockStore, Grid, Position};

    fn app(mines: &[(usize, usize)]) -> App {
        let grid = Grid::new(3, 3).unwrap();
        let store =
            BlockStore::from_mines(grid, mines.iter().copied().map(Position::from)).unwrap();
        let (game, _) = Game::with_board(store);
        App::new(game)
    }

    #[test]
    fn cursor_stays_on_the_board() {
        let mut app = app(&[]);
        app.up();
        app.left();
        assert_eq!((app.active_x, app.active_y), (0, 0));
        for _ in 0..5 {
            app.down();
            app.right();
        }
        assert_eq!((app.active_x, app.active_y), (2, 2));
    }

    #[test]
    fn cells_show_what_the_player_knows() {
        let mut app = app(&[(0, 0)]);
        assert_eq!(app.cell(1, 1).unwrap().to_string(), " ");

        app.active_x = 1;
        app.active_y = 1;
        app.visit_active_cell().unwrap();
        assert_eq!(app.cell(1, 1).unwrap().to_string(), "1");

        app.game.flag(0, 0).unwrap();
        assert_eq!(app.cell(0, 0).unwrap().to_string(), FLAG);
        assert_eq!(app.available_flags(), 0);
    }

    #[test]
    fn losing_uncovers_every_mine() {
        let mut app = app(&[(0, 0), (2, 2)]);
        app.visit_active_cell().unwrap();
        app.outcome = Some(Outcome::Lose);

        assert_eq!(app.cell(2, 2).unwrap().to_string(), BOMB);
        assert!(!app.playing());
    }

    #[test]
    fn cell_text_is_padded_to_the_cell() {
        let app = app(&[]);
        let geometry = Geometry::new(5, 5, 3, 3).unwrap();
        let text = geometry.cell_text(&app.cell(0, 0).unwrap());
        assert_eq!(text, "     \n   \n     ");
        assert_eq!(geometry.board_width, 17);
        assert_eq!(geometry.row_constraints.len(), 3);
    }

    #[test]
    fn snapshot_reads_the_whole_board() {
        let app = app(&[(1, 2)]);
        let snapshot = Snapshot::take(&app).unwrap();
        assert_eq!(snapshot.board.len(), 3);
        assert!(snapshot.board.iter().all(|row| row.len() == 3));
        assert_eq!(snapshot.mines, 1);
        assert_eq!(snapshot.flag_ratio(), 1.0);
        assert_eq!(snapshot.last_move, "last move: none");
    }

    #[test]
    fn help_lines_align_on_separator() {
        let lines = align_strings_to_char(&["a: b", "long: c"], ':');
        assert_eq!(lines, vec!["   a: b", "long: c"]);
    }

    #[test]
    fn last_move_is_described() {
        assert_eq!(describe(None), "last move: none");
        assert_eq!(
            describe(Some(MoveRecord {
                position: Position::new(3, 6),
                action: Action::Number,
            })),
            "last move: hint (3, 6)"
        );
    }
}
