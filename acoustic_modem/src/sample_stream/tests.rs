use std::{
  convert::Infallible,
  io::{self, Cursor, Read},
};

use hound::WavReader;
use rand::Rng;

use super::{Buffer, ByteSource, Dump, HoundInStream, HoundOutStream, SampleReader, StreamIter};
use crate::{
  config::Configuration,
  traits::{InStream, OutStream},
};

const TESTS: usize = 20;

#[test]
fn buffer_pop_across_blocks() {
  let mut buffer = Buffer::new();
  buffer.push_slice(&[1, 2, 3]);
  buffer.push(vec![]);
  buffer.push_slice(&[4, 5]);
  assert_eq!(buffer.len(), 5);

  let mut dest = [0; 4];
  assert_eq!(buffer.pop_slice(&mut dest), 4);
  assert_eq!(dest, [1, 2, 3, 4]);
  assert_eq!(buffer.pop_slice(&mut dest), 1);
  assert_eq!(dest[0], 5);
  assert_eq!(buffer.pop_slice(&mut dest), 0);
  assert!(buffer.is_empty());
}

#[test]
fn buffer_stream() {
  let mut rng = rand::thread_rng();
  for _ in 0..TESTS {
    let data: Vec<f32> = (0..rng.gen_range(0..5000)).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let mut buffer = Buffer::new();
    for chunk in data.chunks(333) {
      buffer.write_exact(chunk).unwrap();
    }
    let mut out = vec![0.0; data.len() + 10];
    let n = buffer.read_exact(&mut out).unwrap();
    assert_eq!(n, data.len());
    assert_eq!(&out[..n], &data[..]);
  }
}

#[test]
fn stream_iter_blocks() {
  let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
  let mut iter = StreamIter::<_, u8, Infallible>::with_block_size(data.iter().copied().collect::<Buffer<u8>>(), 64);
  let collected: Vec<u8> = iter.by_ref().collect();
  assert_eq!(collected, data);
  assert_eq!(iter.total(), 1000);
  assert_eq!(iter.next(), None);
  assert!(iter.take_error().is_none());
}

/// reads a few bytes, then fails
struct FailingReader(usize);

impl Read for FailingReader {
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    if self.0 == 0 {
      return Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
    }
    let n = self.0.min(buf.len());
    buf[..n].fill(7);
    self.0 -= n;
    Ok(n)
  }
}

#[test]
fn byte_source_holds_error() {
  let mut source = ByteSource::from_reader(FailingReader(10));
  assert_eq!(source.by_ref().count(), 10);
  assert_eq!(source.total(), 10);
  assert_eq!(source.next(), None);
  let error = source.take_error().unwrap();
  assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn byte_source_reader() {
  let data = b"some bytes to send".to_vec();
  let mut source = ByteSource::from_reader(Cursor::new(data.clone()));
  assert_eq!(source.by_ref().collect::<Vec<_>>(), data);
  assert_eq!(source.total(), data.len());
}

#[test]
fn dump_tees_samples() {
  let samples: Vec<f32> = (0..10000).map(|i| (i as f32 * 0.01).sin()).collect();
  let mut dump = Dump::<_, Buffer<f32>, Infallible>::new(samples.iter().copied(), Buffer::new());
  // partially consumed: only the pulled samples are dumped
  let pulled: Vec<f32> = dump.by_ref().take(6000).collect();
  assert_eq!(pulled, samples[..6000]);
  let sink = dump.finish().unwrap();
  assert_eq!(sink.into_vec(), samples[..6000]);
}

#[test]
fn wav_round_trip() {
  let config = Configuration::from_bitrate(1).unwrap();
  let samples: Vec<f32> = (0..3000).map(|i| ((i % 100) as f32 / 50.0 - 1.0) * 0.9).collect();

  let mut file = Cursor::new(Vec::new());
  let mut out = HoundOutStream::with_config(&mut file, &config).unwrap();
  out.write_exact(&samples).unwrap();
  out.finalize().unwrap();

  let stream = HoundInStream::new(WavReader::new(Cursor::new(file.into_inner())).unwrap());
  assert_eq!(stream.sample_rate(), 8000);
  let mut reader: SampleReader<_, hound::Error> = SampleReader::new(stream);
  let read: Vec<f32> = reader.by_ref().collect();
  assert!(reader.take_error().is_none());
  assert_eq!(read.len(), samples.len());
  // 16-bit quantization
  assert!(read.iter().zip(&samples).all(|(x, y)| (x - y).abs() < 1e-4));
}

#[test]
fn wav_clips_out_of_range() {
  let config = Configuration::default();
  let mut file = Cursor::new(Vec::new());
  let mut out = HoundOutStream::with_config(&mut file, &config).unwrap();
  out.write_exact(&[2.0, -2.0]).unwrap();
  out.finalize().unwrap();

  let mut reader = WavReader::new(Cursor::new(file.into_inner())).unwrap();
  let pcm: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
  assert_eq!(pcm, vec![i16::MAX, i16::MIN]);
}
