use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use log::{info, warn};

use crate::{
    data::{DEFAULT_MILLI_HZ, DEFAULT_WIN_SCALE, MAX_SCALE_FACTOR, MAX_VIEWPORT_SIDE},
    game::{Layout, Timing},
    modes::Mode::{self, *},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownOption(String),
    MissingValue(&'static str),
    InvalidValue(&'static str, String),
    FeatureDisabled(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownOption(opt) => write!(f, "Argument error: Unknown option {}", opt),
            ConfigError::MissingValue(opt) => {
                write!(f, "Argument error: Expected value for {}", opt)
            }
            ConfigError::InvalidValue(opt, val) => {
                write!(f, "Argument error: Invalid value {:?} for {}", val, opt)
            }
            ConfigError::FeatureDisabled(feature) => write!(
                f,
                "Feature {} is turned off in this build of snek. \
                Recompile with `--features {}` to use this flag.",
                feature, feature
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Startup configuration, assembled from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub mode: Mode,
    pub layout: Layout,
    pub timing: Timing,

    /// Window pixels per buffer pixel. Windowed mode only.
    pub scale: u8,
    pub resize: bool,
    pub milli_hz: u32,

    pub seed: Option<u64>,

    pub quiet: bool,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            layout: Layout::default(),
            timing: Timing::default(),
            scale: DEFAULT_WIN_SCALE,
            resize: false,
            milli_hz: DEFAULT_MILLI_HZ,
            seed: None,
            quiet: false,
            verbose: false,
            log_file: None,
        }
    }
}

fn parse<T: FromStr>(opt: &'static str, val: Option<&String>) -> Result<T, ConfigError> {
    let val = val.ok_or(ConfigError::MissingValue(opt))?;

    val.parse::<T>()
        .map_err(|_| ConfigError::InvalidValue(opt, val.clone()))
}

fn parse_pair<T: FromStr>(opt: &'static str, val: Option<&String>) -> Result<(T, T), ConfigError> {
    let val = val.ok_or(ConfigError::MissingValue(opt))?;
    let invalid = || ConfigError::InvalidValue(opt, val.clone());

    let (a, b) = val.split_once('x').ok_or_else(invalid)?;

    Ok((
        a.parse::<T>().map_err(|_| invalid())?,
        b.parse::<T>().map_err(|_| invalid())?,
    ))
}

fn parse_millis(opt: &'static str, val: Option<&String>) -> Result<Duration, ConfigError> {
    match parse::<u64>(opt, val)? {
        0 => Err(ConfigError::InvalidValue(opt, "0".to_owned())),
        ms => Ok(Duration::from_millis(ms)),
    }
}

impl Settings {
    /// Reads the flags following the program name.
    pub fn eval_args(args: &mut dyn Iterator<Item = &String>) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        args.next();

        while let Some(arg) = args.next() {
            let arg = arg.as_str();
            match arg {
                "--win" => settings.mode = Win,

                #[cfg(feature = "terminal")]
                "--ascii" => settings.mode = ConAscii,

                #[cfg(feature = "terminal")]
                "--block" => settings.mode = ConBlock,

                #[cfg(not(feature = "terminal"))]
                "--ascii" | "--block" => return Err(ConfigError::FeatureDisabled("terminal")),

                "--quiet" => settings.quiet = true,

                "--verbose" => settings.verbose = true,

                "--resize" => settings.resize = true,

                "--size" => settings.layout.cells = parse_pair("--size", args.next())?,

                "--viewport" => {
                    let (w, h): (u16, u16) = parse_pair("--viewport", args.next())?;

                    if w == 0 || h == 0 || w > MAX_VIEWPORT_SIDE || h > MAX_VIEWPORT_SIDE {
                        return Err(ConfigError::InvalidValue("--viewport", format!("{}x{}", w, h)));
                    }

                    settings.layout.viewport = (w, h);
                }

                "--cell" => {
                    settings.layout.cell_len = parse("--cell", args.next())?;

                    if settings.layout.cell_len < 2 {
                        return Err(ConfigError::InvalidValue(
                            "--cell",
                            settings.layout.cell_len.to_string(),
                        ));
                    }
                }

                "--scale" => {
                    let scale: u8 = parse("--scale", args.next())?;

                    if scale == 0 || scale > MAX_SCALE_FACTOR {
                        return Err(ConfigError::InvalidValue("--scale", scale.to_string()));
                    }

                    settings.scale = scale;
                }

                "--fps" => {
                    let rate: f32 = parse("--fps", args.next())?;

                    if !(rate >= 1.0 && rate <= 1000.0) {
                        return Err(ConfigError::InvalidValue("--fps", rate.to_string()));
                    }

                    settings.milli_hz = (rate * 1000.0) as u32;
                }

                "--move-ms" => {
                    settings.timing.move_interval = parse_millis("--move-ms", args.next())?
                }

                "--spawn-ms" => {
                    settings.timing.spawn_interval = parse_millis("--spawn-ms", args.next())?
                }

                "--seed" => settings.seed = Some(parse("--seed", args.next())?),

                "--log-file" => {
                    let path = args.next().ok_or(ConfigError::MissingValue("--log-file"))?;
                    settings.log_file = Some(PathBuf::from(path));
                }

                &_ => return Err(ConfigError::UnknownOption(arg.to_owned())),
            }
        }

        Ok(settings)
    }

    pub fn print_startup_info(&self) {
        let mut string_out = String::new();

        string_out += "Welcome to Snek!\n";

        string_out += "Startup configurations:\n";

        string_out += &format!(
            "Grid: {}x{} cells of {}px\n",
            self.layout.cells.0, self.layout.cells.1, self.layout.cell_len
        );

        string_out += &format!(
            "Move every {}ms, fruit every {}ms\n",
            self.timing.move_interval.as_millis(),
            self.timing.spawn_interval.as_millis()
        );

        string_out += &format!("Refresh rate: {}hz\n", self.milli_hz as f32 / 1000.0);

        if let Some(seed) = self.seed {
            string_out += &format!("Seed: {}\n", seed);
        }

        if self.mode.is_con() {
            string_out += &format!("Running in terminal, renderer: {}", self.mode.get_name());
        } else {
            string_out += "Running graphically";
        }

        info!("{}", string_out);

        if self.resize {
            warn!("Resizing only adds border around the board, it does not grow the grid.");
        }
    }
}
