pub mod config;
pub mod log;

use std::time::{Duration, Instant};

use ::log::{debug, error};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    game::{Direction, GameState, GridError, Session},
    graphics::PixelBuffer,
    modes::Mode,
};

use config::Settings;

pub const DEFAULT_MILLI_HZ: u32 = 60 * 1000;
pub const DEFAULT_WIN_SCALE: u8 = 1;
pub const MAX_SCALE_FACTOR: u8 = 8;
pub const MAX_VIEWPORT_SIDE: u16 = 4096;

/// Main program struct: one game session plus everything a front end
/// needs to drive and show it.
pub struct Program {
    pub session: Session,
    pub pix: PixelBuffer,

    rng: StdRng,

    mode: Mode,
    scale: u8,
    resize: bool,

    milli_hz: u32,
    refresh_rate: Duration,

    last_update: Instant,
    redraw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Restart,
    SwitchConMode,
    Blank,
    Close,
}

impl Command {
    pub fn is_close_requested(&self) -> bool {
        *self == Command::Close
    }
}

impl Program {
    pub fn new(settings: &Settings) -> Result<Self, GridError> {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let session = Session::new(settings.layout, settings.timing, &mut rng)?;

        let (w, h) = settings.layout.viewport;

        let mut prog = Self {
            session,
            pix: PixelBuffer::new(w as usize, h as usize),
            rng,
            mode: settings.mode,
            scale: settings.scale,
            resize: settings.resize,
            milli_hz: settings.milli_hz,
            refresh_rate: Duration::ZERO,
            last_update: Instant::now(),
            redraw: true,
        };

        prog.change_fps_frac(settings.milli_hz);

        Ok(prog)
    }

    /// Applies one input command. Returns true when a redraw is needed.
    pub fn eval_command(&mut self, cmd: &Command) -> bool {
        match *cmd {
            Command::Steer(direction) => {
                self.session.steer(direction);
                false
            }

            Command::Restart => {
                if let Err(err) = self.session.restart(&mut self.rng) {
                    error!("Unable to restart: {}", err);
                    return false;
                }

                self.last_update = Instant::now();
                self.redraw = true;
                true
            }

            Command::SwitchConMode => {
                self.mode = self.mode.next();
                self.redraw = true;
                true
            }

            Command::Blank | Command::Close => false,
        }
    }

    pub fn eval_commands(&mut self, cmds: &mut Vec<Command>) -> bool {
        let mut redraw = false;
        for cmd in cmds.iter() {
            redraw |= self.eval_command(cmd);
        }
        cmds.clear();

        redraw
    }

    /// Advances the game by the wall-clock time since the previous call.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        let dt = now - self.last_update;
        self.last_update = now;

        self.advance(dt)
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        let changed = self.session.update(dt, &mut self.rng);
        self.redraw |= changed;
        changed
    }

    /// Draws the grid into the pixel buffer if anything changed.
    pub fn render(&mut self) -> bool {
        if !std::mem::take(&mut self.redraw) {
            return false;
        }

        self.pix.draw_grid(self.session.grid());
        true
    }

    pub fn force_render(&mut self) {
        self.redraw = true;
        self.render();
    }

    /// New window title, if the game changed it.
    pub fn take_title(&mut self) -> Option<String> {
        let title = self.session.take_title()?.to_owned();
        debug!("Title: {}", title);
        Some(title)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.session.state(), GameState::End(_))
    }

    pub fn change_fps_frac(&mut self, milli_hz: u32) {
        let milli_hz = milli_hz.max(1);
        self.milli_hz = milli_hz;
        self.refresh_rate = Duration::from_micros(1_000_000_000 / milli_hz as u64);
    }

    pub fn get_milli_hz(&self) -> u32 {
        self.milli_hz
    }

    pub fn get_rr_interval(&self) -> Duration {
        self.refresh_rate
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_resizable(&self) -> bool {
        self.resize
    }
}
