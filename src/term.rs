use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::config::Layout;
use crate::grid::Position;
use crate::render::{CellCanvas, CellColor};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

const CELL_CHAR: char = '█';

#[derive(Copy, Clone, Debug, PartialEq)]
struct Glyph {
    ch: char,
    color: Option<Color>,
}

const BLANK: Glyph = Glyph { ch: ' ', color: None };

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    staged: Vec<Glyph>,
    current_msg: Option<Message>,
}

/// Screen area covered by the overlay, restored from `screen` on hide.
#[derive(Clone, Copy)]
struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![BLANK; width as usize * height as usize];
        let staged = screen.clone();
        Ok(TermManager { width, height, stdout, screen, staged, current_msg: None })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> crossterm::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Drains key events, waiting at most `timeout` for the first one.
    pub fn read_key_events_queue(&self, timeout: Duration) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            wait = Duration::from_millis(0);
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Frame of `+`, `-` and `|` around an inner area of `size`, whose first
    /// cell is at `top_left`.
    pub fn draw_borders(&mut self, top_left: Coords, size: Coords) -> crossterm::Result<()> {
        let (left, top) = (top_left.0 - 1, top_left.1 - 1);
        let (end_x, end_y) = (top_left.0 + size.0, top_left.1 + size.1);

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top_left.1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    pub fn hide_message(&mut self) -> crossterm::Result<()> {
        let Message { top_left, width, height } = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..height {
            for x_diff in 0..width {
                let pos = (top_left.0 + x_diff, top_left.1 + y_diff);
                let glyph = match self.index(pos) {
                    Some(i) => self.screen[i],
                    None => continue,
                };
                self.emit(pos, glyph)?;
            }
        }

        self.flush()
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) -> crossterm::Result<()> {
        self.print_glyph(pos, Glyph { ch, color: None })
    }

    /// Writes `text` starting at `pos`, padding with blanks up to `width`.
    pub fn print_line(&mut self, pos: Coords, text: &str, width: TermInt) -> crossterm::Result<()> {
        let mut chars = text.chars();
        for x_diff in 0..width {
            let ch = chars.next().unwrap_or(' ');
            self.print_at((pos.0 + x_diff, pos.1), ch)?;
        }
        self.flush()
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![BLANK; self.width as usize * self.height as usize];
        self.staged = self.screen.clone();
        Ok(())
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    /// Starts composing a frame on top of what is currently shown.
    pub fn begin_frame(&mut self) {
        self.staged.clone_from(&self.screen);
    }

    /// Writes out only the characters that changed since the last frame.
    pub fn commit_frame(&mut self) -> crossterm::Result<()> {
        for i in 0..self.staged.len() {
            if self.staged[i] != self.screen[i] {
                let pos = ((i % self.width as usize) as TermInt, (i / self.width as usize) as TermInt);
                let glyph = self.staged[i];
                self.print_glyph(pos, glyph)?;
            }
        }
        self.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn stage(&mut self, pos: Coords, glyph: Glyph) {
        if let Some(i) = self.index(pos) {
            self.staged[i] = glyph;
        }
    }

    fn print_glyph(&mut self, pos: Coords, glyph: Glyph) -> crossterm::Result<()> {
        if let Some(i) = self.index(pos) {
            self.emit(pos, glyph)?;
            self.screen[i] = glyph;
        }
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> crossterm::Result<()> {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        self.emit(pos, Glyph { ch, color: None })
    }

    fn emit(&mut self, pos: Coords, glyph: Glyph) -> crossterm::Result<()> {
        match glyph.color {
            Some(color) => queue!(
                self.stdout,
                cursor::MoveTo(pos.0, pos.1),
                style::SetForegroundColor(color),
                style::Print(glyph.ch),
                style::ResetColor
            ),
            None => queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(glyph.ch)),
        }
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }
}

/// The board area of the terminal, painted cell by cell into the frame being
/// composed.
pub struct BoardCanvas<'a> {
    term: &'a mut TermManager,
    layout: Layout,
    origin: Coords,
}

impl<'a> BoardCanvas<'a> {
    pub fn new(term: &'a mut TermManager, layout: Layout, origin: Coords) -> Self {
        BoardCanvas { term, layout, origin }
    }

    pub fn blank(&mut self) {
        let (width, height) = self.layout.canvas_size();
        for y in 0..height {
            for x in 0..width {
                self.term.stage((self.origin.0 + x, self.origin.1 + y), BLANK);
            }
        }
    }
}

impl CellCanvas for BoardCanvas<'_> {
    fn fill_cell(&mut self, pos: Position, color: CellColor) {
        let glyph = Glyph { ch: CELL_CHAR, color: Some(term_color(color)) };
        let ((left, top), width, height) = self.layout.cell_rect(pos);
        for y in top..top + height {
            for x in left..left + width {
                self.term.stage((self.origin.0 + x, self.origin.1 + y), glyph);
            }
        }
    }
}

fn term_color(color: CellColor) -> Color {
    match color {
        // Plain black disappears on a dark terminal
        CellColor::Black => Color::DarkGrey,
        CellColor::Blue => Color::Blue,
        CellColor::Red => Color::Red,
        CellColor::Green => Color::Green,
    }
}
