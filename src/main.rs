//! glyphgen CLI entrypoint.
//!
//! Parses the inference flags and hands them to `cli::run`, which renders
//! one batch and writes it under `<save_path>/<prompt>/`. Any load or
//! render failure ends the process with the error. Embedders should call
//! `glyphgen::api` directly.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
