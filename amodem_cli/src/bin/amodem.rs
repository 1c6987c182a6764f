use std::{path::PathBuf, process::ExitCode};

use acoustic_modem::{Configuration, DefaultConfig, Result};
use amodem_cli::{
  cli_util::{error_prompt, note_prompt},
  commands,
};

use clap::{Parser, Subcommand};
use log::error;

#[derive(Parser)]
#[command(about = "Audio modem over WAV files")]
struct Amodem {
  #[command(subcommand)]
  cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
  /// list the bitrate presets
  Bitrates,
  /// modulate a file (or stdin) into a WAV file
  Send {
    /// bitrate preset in kb/s
    bitrate: u32,
    /// data to send, stdin if missing
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// WAV file to write
    #[arg(short, long)]
    output: PathBuf,
    /// announce the working configuration over this bitrate preset first
    #[arg(long)]
    bootstrap: Option<u32>,
    /// output amplitude
    #[arg(long, default_value_t = 1.0)]
    gain: f32,
    /// extra seconds of leading silence
    #[arg(long, default_value_t = 0.0)]
    silence: f64,
    /// seconds of trailing silence
    #[arg(long, default_value_t = DefaultConfig::SILENCE_STOP)]
    silence_stop: f64,
  },
  /// demodulate a WAV file into a file (or stdout)
  Recv {
    /// bitrate preset in kb/s, the bootstrap one with --reconfigure
    bitrate: u32,
    /// WAV file to read
    #[arg(short, long)]
    input: PathBuf,
    /// file to write the data to, stdout if missing
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// read the working configuration from the signal
    #[arg(long)]
    reconfigure: bool,
    /// copy the received audio to this WAV file
    #[arg(long)]
    dump: Option<PathBuf>,
    /// seconds skipped before waiting for the carrier
    #[arg(long, default_value_t = DefaultConfig::SKIP_START)]
    skip: f64,
  },
}

fn run(cmd: Cmd) -> Result<()> {
  match cmd {
    Cmd::Bitrates => commands::bitrates(),
    Cmd::Send {
      bitrate,
      input,
      output,
      bootstrap,
      gain,
      silence,
      silence_stop,
    } => {
      let config = Configuration::from_bitrate(bitrate)?.with_silence(DefaultConfig::SILENCE_START, silence_stop);
      let bootstrap = bootstrap.map(Configuration::from_bitrate).transpose()?;
      let report = commands::send(&config, input.as_deref(), &output, bootstrap.as_ref(), gain, silence)?;
      eprintln!(
        "{}",
        note_prompt(format!(
          "sent {} bytes, {:.3} seconds of data",
          report.bytes,
          report.data_duration()
        ))
      );
    }
    Cmd::Recv {
      bitrate,
      input,
      output,
      reconfigure,
      dump,
      skip,
    } => {
      let config = Configuration::from_bitrate(bitrate)?.with_skip_start(skip);
      let report = commands::recv(&config, &input, output.as_deref(), reconfigure, dump.as_deref())?;
      eprintln!(
        "{}",
        note_prompt(format!(
          "received {} bytes in {} frames, at most {} errors corrected per frame",
          report.bytes, report.frames, report.max_errors
        ))
      );
    }
  }
  Ok(())
}

fn main() -> ExitCode {
  env_logger::init();
  let Amodem { cmd } = Amodem::parse();
  match run(cmd) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{e}");
      eprintln!("{} {e}", error_prompt("error:"));
      ExitCode::FAILURE
    }
  }
}
