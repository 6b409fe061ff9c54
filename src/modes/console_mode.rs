use crossterm::{
    cursor::{self, Hide, Show},
    event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, Stylize},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};

use fps_clock::FpsClock;
use log::info;

use std::{
    io::{stdout, Stdout, Write},
    time::Duration,
};

use crate::{
    data::{Command, Program},
    game::{Cell, Direction, Grid, Occupancy},
    graphics::{blend::Argb, Pixel},
    modes::Mode,
};

/// Row the board starts on; the title sits above it.
const BOARD_TOP: u16 = 2;

/// A run of characters sharing one color. Printing runs instead of single
/// cells keeps the number of escape sequences down.
#[derive(Debug, PartialEq)]
struct ColoredString {
    pub string: String,
    pub fg: Argb,
}

impl ColoredString {
    pub fn new(s: &str, fg: Argb) -> Self {
        Self {
            string: s.to_owned(),
            fg,
        }
    }

    pub fn append(&mut self, s: &str, fg: Argb) -> bool {
        if self.fg != fg {
            return false;
        }

        self.string.push_str(s);
        true
    }
}

#[derive(Default)]
struct StyledLine(Vec<ColoredString>);

impl StyledLine {
    fn push_cell(&mut self, s: &str, fg: Argb) {
        if let Some(last) = self.0.last_mut() {
            if last.append(s, fg) {
                return;
            }
        }

        self.0.push(ColoredString::new(s, fg));
    }

    fn queue_print(&self, stdout: &mut Stdout) {
        for ColoredString { string, fg } in &self.0 {
            let [_, r, g, b] = fg.decompose();
            let _ = queue!(
                stdout,
                Print(string.as_str().with(Color::Rgb { r, g, b }))
            );
        }
    }
}

/// The two characters one cell occupies on screen.
fn cell_glyph(cell: &Cell, mode: Mode) -> &'static str {
    match (mode, cell.kind()) {
        (Mode::ConBlock, Occupancy::Vacant) => "··",
        (Mode::ConBlock, _) => "██",
        (_, Occupancy::Vacant) => ". ",
        (_, Occupancy::SnakeBody) => "[]",
        (_, Occupancy::Fruit) => "()",
    }
}

fn grid_lines(grid: &Grid, mode: Mode) -> Vec<StyledLine> {
    (0..grid.height())
        .map(|y| {
            let mut line = StyledLine::default();

            for cell in (0..grid.width()).filter_map(|x| grid.at(x, y)) {
                line.push_cell(cell_glyph(cell, mode), cell.color());
            }

            line
        })
        .collect()
}

/// Maps a key to a game command. Arrows and WASD steer.
pub fn key_to_command(event: KeyEvent) -> Command {
    if event.kind != KeyEventKind::Press {
        return Command::Blank;
    }

    match event.code {
        KeyCode::Esc | KeyCode::Char('q') => Command::Close,

        KeyCode::Left | KeyCode::Char('a') => Command::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Command::Steer(Direction::Right),
        KeyCode::Up | KeyCode::Char('w') => Command::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Command::Steer(Direction::Down),

        KeyCode::Char('r') => Command::Restart,

        KeyCode::Char('.') => Command::SwitchConMode,

        _ => Command::Blank,
    }
}

impl Program {
    pub fn print_con(&mut self, stdout: &mut Stdout, title: &str) {
        let _ = queue!(
            stdout,
            cursor::MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Bold),
            Print(title),
            SetAttribute(Attribute::Reset)
        );

        for (y, line) in grid_lines(self.session.grid(), self.mode()).iter().enumerate() {
            let _ = queue!(stdout, cursor::MoveTo(0, BOARD_TOP + y as u16));
            line.queue_print(stdout);
        }

        let _ = queue!(stdout, ResetColor);
    }

    pub fn clear_con(&mut self, stdout: &mut Stdout) {
        let _ = queue!(stdout, Clear(ClearType::All));
    }
}

/// Drains pending input without blocking.
pub fn control_key_events_con(prog: &mut Program, exit: &mut bool) -> std::io::Result<bool> {
    let mut redraw = false;

    while poll(Duration::ZERO)? {
        match read()? {
            Event::Key(event) => {
                let cmd = key_to_command(event);

                if cmd.is_close_requested() {
                    *exit = true;
                    break;
                }

                redraw |= prog.eval_command(&cmd);
            }

            Event::Resize(..) => redraw = true,

            _ => {}
        }
    }

    Ok(redraw)
}

/// Runs the game in the terminal until the player quits.
pub fn con_main(mut prog: Program) -> std::io::Result<()> {
    let mut stdout = stdout();

    enable_raw_mode()?;

    queue!(
        stdout,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        SetTitle(crate::game::state::TITLE)
    )?;
    stdout.flush()?;

    let fps = (prog.get_milli_hz() / 1000).max(1);
    let mut clock = FpsClock::new(fps);

    let mut exit = false;
    let mut title = prog.session.title().to_owned();
    let mut dirty = true;

    info!("Terminal loop running at {}fps", fps);

    let result = (|| -> std::io::Result<()> {
        while !exit {
            if control_key_events_con(&mut prog, &mut exit)? {
                prog.clear_con(&mut stdout);
                dirty = true;
            }

            dirty |= prog.update();

            if let Some(new_title) = prog.take_title() {
                queue!(stdout, SetTitle(&new_title))?;
                title = new_title;
                dirty = true;
            }

            if std::mem::take(&mut dirty) {
                prog.print_con(&mut stdout, &title);
                stdout.flush()?;
            }

            clock.tick();
        }

        Ok(())
    })();

    queue!(stdout, LeaveAlternateScreen, Show)?;
    stdout.flush()?;
    disable_raw_mode()?;

    result
}
