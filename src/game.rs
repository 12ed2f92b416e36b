use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::config::{GameConfig, Layout};
use crate::error::{ConfigurationError, GameError};
use crate::log;
use crate::render::draw_session;
use crate::session::GameSession;
use crate::snake::Direction::{self, *};
use crate::term::{BoardCanvas, Coords, TermManager};

/// Score on row 0, top border on row 1, board from row 2.
const BOARD_ORIGIN: Coords = (1, 2);

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
    #[error("terminal is {actual:?} but the board needs at least {needed:?}")]
    TerminalTooSmall { needed: Coords, actual: Coords },
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Pause,
    Restart,
    Quit,
}

/// Maps a key press to what the player meant by it.
pub fn key_action(ev: &KeyEvent) -> Option<KeyAction> {
    if is_ctrl_c(ev) {
        return Some(KeyAction::Quit);
    }
    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(KeyAction::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(KeyAction::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(KeyAction::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(KeyAction::Turn(Right)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Restart),
        KeyCode::Esc => Some(KeyAction::Pause),
        _ => None,
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Terminal frontend: runs the session at a fixed frame interval and paints it
/// after every tick.
pub struct SnakeGame {
    session: GameSession,
    layout: Layout,
    frame_interval: Duration,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: &GameConfig) -> Result<Self, FrontendError> {
        let session = GameSession::new(config)?;
        let layout = config.layout()?;
        let term = TermManager::new()?;

        let (canvas_width, canvas_height) = layout.canvas_size();
        let needed = (canvas_width.saturating_add(2), canvas_height.saturating_add(4));
        let actual = term.get_terminal_size();
        if actual.0 < needed.0 || actual.1 < needed.1 {
            return Err(FrontendError::TerminalTooSmall { needed, actual });
        }

        Ok(SnakeGame {
            session,
            layout,
            frame_interval: config.frame_interval(),
            paused: false,
            term,
        })
    }

    /// Takes over the terminal until the player quits, then hands it back.
    pub fn run(&mut self) -> Result<(), FrontendError> {
        self.term.setup()?;
        let result = self.run_inner();
        self.term.restore()?;
        result
    }

    ///////////////////////////////////////////////////////////////////////////

    fn run_inner(&mut self) -> Result<(), FrontendError> {
        self.term.clear()?;
        if let Flow::Quit = self.show_intro()? {
            return Ok(());
        }
        self.term.draw_borders(BOARD_ORIGIN, self.layout.canvas_size())?;
        self.play()
    }

    fn show_intro(&mut self) -> Result<Flow, FrontendError> {
        let lines = &[
            "Arrow keys or WASD to move",
            "R to restart",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::Continue)
    }

    fn play(&mut self) -> Result<(), FrontendError> {
        let mut next_tick = Instant::now() + self.frame_interval;
        self.draw()?;

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());

            for key_ev in self.term.read_key_events_queue(timeout)? {
                match key_action(&key_ev) {
                    Some(KeyAction::Quit) => return Ok(()),
                    Some(KeyAction::Turn(dir)) if !self.paused => self.session.set_input(dir),
                    Some(KeyAction::Restart) => {
                        if self.paused {
                            self.toggle_pause()?;
                        }
                        self.session.reset();
                        self.draw()?;
                        next_tick = Instant::now() + self.frame_interval;
                    }
                    Some(KeyAction::Pause) => self.toggle_pause()?,
                    _ => {}
                }
            }

            if self.paused {
                next_tick = Instant::now() + self.frame_interval;
                continue;
            }

            if Instant::now() < next_tick {
                continue;
            }
            next_tick += self.frame_interval;

            match self.session.tick() {
                Ok(_) => {}
                Err(GameError::SpawnExhausted { .. }) => {
                    if let Flow::Quit = self.board_full()? {
                        return Ok(());
                    }
                    next_tick = Instant::now() + self.frame_interval;
                }
                Err(err) => return Err(err.into()),
            }

            self.draw()?;
        }
    }

    fn draw(&mut self) -> Result<(), FrontendError> {
        self.term.begin_frame();
        {
            let mut canvas = BoardCanvas::new(&mut self.term, self.layout, BOARD_ORIGIN);
            canvas.blank();
            draw_session(&self.session, &mut canvas);
        }
        self.term.commit_frame()?;

        let (width, height) = self.layout.canvas_size();
        let line_width = width + 2;
        let score = format!("Score: {}", self.session.score());
        self.term.print_line((0, 0), &score, line_width)?;

        let status = if self.session.is_over() {
            "You died! Press R to restart"
        } else {
            ""
        };
        self.term.print_line((0, BOARD_ORIGIN.1 + height + 1), status, line_width)?;
        Ok(())
    }

    /// Nowhere left to put an item. Any key starts over.
    fn board_full(&mut self) -> Result<Flow, FrontendError> {
        log!("Board full at score {}", self.session.score());
        let score = format!("Score: {}", self.session.score());
        self.term.show_message(&[
            "The board is full!",
            score.as_str(),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        self.session.reset();
        Ok(Flow::Continue)
    }

    fn toggle_pause(&mut self) -> Result<(), FrontendError> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
