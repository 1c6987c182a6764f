/// Utilities for CLI, console text style and file/stdio selection
pub mod cli_util;

/// `bitrates`, `send` and `recv` subcommands over WAV files
pub mod commands;

#[cfg(test)]
mod tests;
