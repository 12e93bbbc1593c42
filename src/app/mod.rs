pub mod renderer;

use std::io::{Stdout, Write};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    execute, queue,
    style::{Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use thiserror::Error;

use crate::{
    app::renderer::{Glyph, draw_glyph, draw_grid, fits_terminal, log_terminal},
    error::MazeError,
    game::{Direction, GameState},
    generator::generate_maze,
    maze::Cell,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, PartialEq)]
enum GameRunResult {
    /// The player stepped on the goal
    GoalReached,
    /// Game is canceled by user
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Grid rows, including wall rows
    pub rows: u16,
    /// Grid columns, including wall columns
    pub cols: u16,
    /// Seed for the first maze. Later rounds use `seed + round`.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rows: 21,
            cols: 21,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Seed for the given round of play, so a fixed seed still gives a fresh maze each round.
    fn round_seed(&self, round: u64) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(round))
    }
}

pub struct App {
    config: AppConfig,
}

impl App {
    /// Lines reserved below the grid for status messages
    const MESSAGE_LINES: u16 = 2;

    pub fn new(config: AppConfig) -> Self {
        App { config }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Generate one maze and print it to stdout without touching terminal modes.
    pub fn run_print(&self, stdout: &mut Stdout) -> Result<(), AppError> {
        let grid = generate_maze(self.config.rows, self.config.cols, self.config.seed)?;
        tracing::info!(
            "[print] Printing {}x{} maze with {} open cells",
            grid.rows(),
            grid.cols(),
            grid.open_count()
        );
        for row in grid.iter_rows() {
            for cell in row {
                write!(stdout, "{}", cell)?;
            }
            writeln!(stdout)?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Play mazes in the terminal until the user quits.
    /// Expects the terminal to be set up with [`App::setup_terminal`].
    pub fn run_game(&self, stdout: &mut Stdout) -> Result<(), AppError> {
        tracing::info!(
            "[game] Starting game with maze size {}x{}",
            self.config.rows,
            self.config.cols
        );

        let mut round = 0;
        loop {
            let grid = generate_maze(
                self.config.rows,
                self.config.cols,
                self.config.round_seed(round),
            )?;

            if !fits_terminal(&grid, terminal::size()?, Self::MESSAGE_LINES) {
                let msg = format!(
                    "Terminal size is too small for the maze. It needs at least {} columns and {} rows. Press Esc to exit...",
                    grid.cols() as u32 * Cell::CELL_WIDTH as u32,
                    grid.rows() as u32 + Self::MESSAGE_LINES as u32,
                );
                execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
                log_terminal(
                    stdout,
                    0,
                    Some(msg.with(Color::Yellow).attribute(Attribute::Bold)),
                )?;
                App::wait_for_key(&[KeyCode::Esc])?;
                return Ok(());
            }

            let mut game = GameState::new(grid);
            let game_result = App::play(stdout, &mut game)?;
            tracing::info!("[game] Round {} ended with {:?}", round, game_result);
            if game_result == GameRunResult::Canceled {
                break;
            }

            log_terminal(
                stdout,
                game.grid().rows(),
                Some(
                    format!(
                        "Congratulations! You reached the end of the maze in {} steps. Press Enter for a new maze, or Esc to exit.",
                        game.path().len() - 1
                    )
                    .with(Color::Green)
                    .attribute(Attribute::Bold),
                ),
            )?;
            if App::wait_for_key(&[KeyCode::Enter, KeyCode::Esc])? == KeyCode::Esc {
                break;
            }
            round += 1;
        }
        tracing::info!("[game] Game was canceled by user, exiting...");

        Ok(())
    }

    /// Draw the maze and move the player on arrow keys until the goal is reached or the user quits.
    fn play(stdout: &mut Stdout, game: &mut GameState) -> std::io::Result<GameRunResult> {
        let grid_rows = game.grid().rows();
        draw_grid(stdout, game.grid())?;
        draw_glyph(stdout, game.goal(), Glyph::Goal)?;
        draw_glyph(stdout, game.player(), Glyph::Player)?;
        log_terminal(
            stdout,
            grid_rows,
            Some("←/→/↑/↓: move, Esc or q: exit".with(Color::Cyan)),
        )?;

        loop {
            if game.goal_reached() {
                return Ok(GameRunResult::GoalReached);
            }

            let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != event::KeyEventKind::Press {
                continue;
            }

            let direction = match code {
                KeyCode::Esc | KeyCode::Char('q') => return Ok(GameRunResult::Canceled),
                KeyCode::Up => Direction::Up,
                KeyCode::Down => Direction::Down,
                KeyCode::Left => Direction::Left,
                KeyCode::Right => Direction::Right,
                _ => continue,
            };

            let previous = game.player();
            if let Some(current) = game.move_player(direction) {
                draw_glyph(stdout, previous, Glyph::Trail)?;
                draw_glyph(stdout, current, Glyph::Player)?;
                stdout.flush()?;
            }
        }
    }

    /// Block until one of `keys` is pressed and return it.
    fn wait_for_key(keys: &[KeyCode]) -> std::io::Result<KeyCode> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
                && kind == event::KeyEventKind::Press
                && keys.contains(&code)
            {
                return Ok(code);
            }
        }
    }
}
