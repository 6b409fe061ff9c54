#[cfg(feature = "terminal")]
pub mod console_mode;

pub mod windowed_mode;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Win,
    ConAscii,
    ConBlock,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Win
    }
}

impl Mode {
    pub fn get_name(&self) -> &'static str {
        match self {
            Mode::Win => "window",
            Mode::ConAscii => "ascii",
            Mode::ConBlock => "block",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Mode::ConAscii => Mode::ConBlock,
            Mode::ConBlock => Mode::ConAscii,
            _ => self,
        }
    }

    pub fn is_con(&self) -> bool {
        matches!(self, Mode::ConAscii | Mode::ConBlock)
    }
}
