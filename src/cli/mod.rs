//! Command Line Interface (CLI) layer for glyphgen.
//!
//! This module defines argument parsing (`args`) and the orchestration
//! logic (`runner`) for a single inference run. It wires user-provided
//! options to the library functionality exposed via `glyphgen::api`.
pub mod args;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
