use std::convert::Infallible;

use rand::Rng;

use super::LineCode;
use crate::{
  config::Configuration,
  error::Error,
  sample_stream::Buffer,
  traits::{Detector, Demodulator, Modulator, Sampler, Samples},
};

const TESTS: usize = 10;

type Transmitter = LineCode<Buffer<f32>, Infallible>;

fn config() -> Configuration {
  Configuration::from_bitrate(1).unwrap()
}

fn random_bits(len: usize) -> Vec<bool> {
  let mut rng = rand::thread_rng();
  (0..len).map(|_| rng.gen()).collect()
}

/// silence, training, then `bits`
fn transmit(config: &Configuration, bits: &[bool], gain: f32) -> Vec<f32> {
  let mut tx = Transmitter::new(Buffer::new(), config).with_gain(gain);
  tx.silence(1000).unwrap();
  tx.start().unwrap();
  tx.modulate(bits.iter().copied()).unwrap();
  tx.silence(500).unwrap();
  tx.into_sink().into_vec()
}

fn receive(config: &Configuration, signal: Samples<'_>, len: usize) -> (Vec<bool>, f32, f32) {
  let mut rx = LineCode::receiver();
  let detection = rx.detect(config, signal).unwrap();
  let freq = 1.0 / (1.0 + detection.freq_error);
  let signal = rx.resample(detection.signal, freq);
  let bits = rx.demodulate(config, signal, 1.0 / detection.amplitude).unwrap();
  (bits.take(len).collect(), detection.amplitude, detection.freq_error)
}

#[test]
fn symbol_levels() {
  let config = config();
  let sps = config.samples_per_symbol();
  let mut tx = Transmitter::new(Buffer::new(), &config).with_gain(0.5);
  tx.modulate([true, false].into_iter()).unwrap();
  assert_eq!(tx.offset(), 2 * sps);
  let samples = tx.into_sink().into_vec();
  assert!(samples[..sps].iter().all(|&x| x == 0.5));
  assert!(samples[sps..].iter().all(|&x| x == -0.5));
}

#[test]
fn offset_restarts_on_reconfigure() {
  let mut tx = Transmitter::new(Buffer::new(), &config());
  tx.silence(123).unwrap();
  tx.start().unwrap();
  assert_eq!(tx.offset(), 123 + 17 * config().samples_per_symbol());
  let target = Configuration::from_bitrate(8).unwrap();
  tx.reconfigure(&target).unwrap();
  assert_eq!(tx.offset(), 0);
  assert_eq!(tx.config(), &target);
}

#[test]
fn line_code_round_trip() {
  let config = config();
  let mut rng = rand::thread_rng();
  for _ in 0..TESTS {
    let bits = random_bits(rng.gen_range(1..500));
    let gain = rng.gen_range(0.1..1.0);
    let signal = transmit(&config, &bits, gain);
    let (received, amplitude, freq_error) = receive(&config, Box::new(signal.into_iter()), bits.len());
    assert_eq!(received, bits);
    assert!((amplitude - gain).abs() < 1e-5);
    assert_eq!(freq_error, 0.0);
  }
}

#[test]
fn resample_corrects_drift() {
  let config = Configuration::new(8e3, 2, [2e3, 2e3])
    .unwrap()
    .with_symbol_duration(0.01)
    .unwrap();
  let bits = random_bits(200);
  let signal = transmit(&config, &bits, 1.0);
  // a receiver clock 1% fast: one extra sample every hundred
  let stretched: Vec<f32> = signal
    .iter()
    .enumerate()
    .flat_map(|(i, &x)| std::iter::repeat(x).take(if i % 100 == 99 { 2 } else { 1 }))
    .collect();

  let (received, _, freq_error) = receive(&config, Box::new(stretched.into_iter()), bits.len());
  assert!((freq_error - 0.01).abs() < 2e-3, "estimated {freq_error}");
  assert_eq!(received, bits);
}

#[test]
fn resample_identity() {
  let samples: Vec<f32> = (0..100).map(|i| i as f32).collect();
  let mut rx = LineCode::receiver();
  let same: Vec<f32> = rx.resample(Box::new(samples.clone().into_iter()), 1.0).collect();
  assert_eq!(same, samples);
  let halved: Vec<f32> = rx.resample(Box::new(samples.clone().into_iter()), 0.5).collect();
  assert_eq!(halved, (0..50).map(|i| (2 * i) as f32).collect::<Vec<_>>());
}

#[test]
fn no_carrier() {
  let mut rx = LineCode::receiver();
  let silence: Samples = Box::new(std::iter::repeat(0.0).take(10000));
  let result = rx.detect(&config(), silence);
  assert!(matches!(result, Err(Error::Carrier(_))));
}

#[test]
fn demodulation_is_lazy() {
  let config = config();
  let sps = config.samples_per_symbol();
  let signal = transmit(&config, &random_bits(100), 1.0);
  let mut signal = signal.into_iter();
  let mut rx = LineCode::receiver();
  {
    let detection = rx.detect(&config, Box::new(signal.by_ref())).unwrap();
    let bits = rx.demodulate(&config, detection.signal, 1.0).unwrap();
    assert_eq!(bits.take(10).count(), 10);
  }
  // silence, training, sync and ten symbols consumed
  assert_eq!(signal.len(), (100 - 10) * sps + 500);
}
