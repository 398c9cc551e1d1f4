//! # Class schedule rendering tool
#![warn(missing_docs)]

use color_eyre::eyre;

mod cli;

use cli::opt::{Command, Options};

fn main() -> eyre::Result<()> {
    let opt: Options = cli::init()?;
    match opt.command {
        Command::Week(args) => cli::render::week(args),
        Command::Day(args) => cli::render::day(args),
        Command::Demo(args) => cli::demo::run(args),
    }
}
