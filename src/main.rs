//! `horarios`: show, edit and publish the schedule of a school sports event.

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
