use std::{fs, path::PathBuf};

use acoustic_modem::{config, Configuration, Error};

use crate::commands::{self, keep_receive_error};

fn temp_path(name: &str) -> PathBuf {
  std::env::temp_dir().join(format!("amodem-cli-{}-{name}", std::process::id()))
}

#[test]
fn send_recv_files() {
  let config = Configuration::from_bitrate(12).unwrap();
  let (input, wav, output, dump) = (
    temp_path("in.bin"),
    temp_path("link.wav"),
    temp_path("out.bin"),
    temp_path("dump.wav"),
  );
  let data: Vec<u8> = (0..2000_u32).map(|i| (i * 7 % 251) as u8).collect();
  fs::write(&input, &data).unwrap();

  let sent = commands::send(&config, Some(input.as_path()), &wav, Some(&config::slowest()), 0.5, 0.2).unwrap();
  assert_eq!(sent.bytes, data.len());
  let received = commands::recv(&config::slowest(), &wav, Some(output.as_path()), true, Some(dump.as_path())).unwrap();
  assert_eq!(received.bytes, data.len());
  assert_eq!(fs::read(&output).unwrap(), data);
  assert!(hound::WavReader::open(&dump).unwrap().len() > 0);

  for path in [input, wav, output, dump] {
    fs::remove_file(path).unwrap();
  }
}

#[test]
fn recv_missing_file() {
  let result = commands::recv(&Configuration::default(), &temp_path("missing.wav"), None, false, None);
  assert!(matches!(result, Err(Error::Wav(_))));
}

#[test]
fn unknown_bitrate() {
  assert!(Configuration::from_bitrate(3).is_err());
}

#[test]
fn receive_error_outlives_dump_error() {
  let dump_error = || Err::<(), _>(hound::Error::Unsupported);
  let result = keep_receive_error::<(), _>(Err(Error::Carrier("lost".into())), dump_error());
  assert!(matches!(result, Err(Error::Carrier(_))));
  // a dump failure of a good session is reported
  assert!(matches!(keep_receive_error(Ok(7), dump_error()), Err(Error::Wav(_))));
  assert!(matches!(keep_receive_error(Ok(7), Ok::<(), hound::Error>(())), Ok(7)));
}

#[test]
fn trailing_silence_option() {
  let config = Configuration::from_bitrate(8).unwrap();
  let (input, long, short) = (temp_path("data.bin"), temp_path("long.wav"), temp_path("short.wav"));
  fs::write(&input, b"some data").unwrap();

  commands::send(&config, Some(input.as_path()), &long, None, 1.0, 0.0).unwrap();
  let trimmed = config.clone().with_silence(config.silence_start(), 0.0);
  commands::send(&trimmed, Some(input.as_path()), &short, None, 1.0, 0.0).unwrap();

  let len = |path: &PathBuf| hound::WavReader::open(path).unwrap().len() as usize;
  assert_eq!(len(&long) - len(&short), config.samples_for(config.silence_stop()));
  for path in [input, long, short] {
    fs::remove_file(path).unwrap();
  }
}
