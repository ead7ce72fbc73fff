//! Starfield - command-line renderer for the orbiting star-trail animation

use std::process::ExitCode;

use starfield::cli;

fn main() -> ExitCode {
    cli::run()
}
