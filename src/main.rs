mod data;
mod game;
mod graphics;
mod modes;

use anyhow::Context;

use data::{config::Settings, Program};
use modes::Mode;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let settings = Settings::eval_args(&mut args.iter())?;

    data::log::init(&settings)?;

    settings.print_startup_info();

    let prog = Program::new(&settings).context("Unable to lay out the eating-ground")?;

    match settings.mode {
        Mode::Win => modes::windowed_mode::winit_main(prog),

        #[cfg(feature = "terminal")]
        Mode::ConAscii | Mode::ConBlock => {
            modes::console_mode::con_main(prog).context("Terminal front end failed")
        }

        #[cfg(not(feature = "terminal"))]
        Mode::ConAscii | Mode::ConBlock => {
            anyhow::bail!("Snek was built without the terminal feature")
        }
    }
}
