use std::{
  fs::File,
  io::{stdin, stdout, BufReader, BufWriter, Read, Result, Write},
  path::Path,
};

use console::{style, StyledObject};

/// Read from the file at `path`, or from stdin without one.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
  Ok(match path {
    Some(path) => Box::new(BufReader::new(File::open(path)?)),
    None => Box::new(stdin().lock()),
  })
}

/// Write to the file at `path`, or to stdout without one.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
  Ok(match path {
    Some(path) => Box::new(BufWriter::new(File::create(path)?)),
    None => Box::new(stdout().lock()),
  })
}

pub fn title_prompt<D>(prompt: D) -> StyledObject<D> {
  style(prompt).green().bold()
}
pub fn error_prompt<D>(prompt: D) -> StyledObject<D> {
  style(prompt).red().bold()
}
pub fn note_prompt<D>(prompt: D) -> StyledObject<D> {
  style(prompt).yellow().dim()
}
