use super::{bitrates, fastest, slowest, Configuration};
use crate::error::ConfigError;

/// every preset runs at exactly its nominal bitrate
#[test]
fn presets_bitrate() {
  let presets: Vec<_> = bitrates().collect();
  assert_eq!(presets.len(), 18);
  for (kbps, config) in presets {
    assert_eq!(config.modem_bps(), kbps as usize * 1000, "preset {kbps}");
  }
}

#[test]
fn fastest_slowest() {
  assert_eq!(fastest().modem_bps(), 80_000);
  assert_eq!(slowest().modem_bps(), 1_000);
}

#[test]
fn derived_quantities() {
  let config = Configuration::new(48000.0, 16, [1000.0, 8000.0]).unwrap();
  assert_eq!(config.samples_per_symbol(), 48);
  assert_eq!(config.baud(), 1000);
  assert_eq!(config.carrier_count(), 8);
  assert_eq!(config.frequencies().first(), Some(&1000.0));
  assert_eq!(config.frequencies().last(), Some(&8000.0));
  assert_eq!(config.bits_per_symbol(), 4);
  assert_eq!(config.bits_per_baud(), 32);
  assert_eq!(config.fc(), 1000.0);
  assert_eq!(config.samples_for(0.1), 4800);
}

#[test]
fn single_carrier() {
  let config = Configuration::from_bitrate(2).unwrap();
  assert_eq!(config.frequencies(), vec![2000.0]);
  assert_eq!(config.samples_per_symbol(), 8);
}

#[test]
fn invalid_parameters() {
  assert_eq!(
    Configuration::new(8000.0, 12, [1e3, 2e3]),
    Err(ConfigError::ConstellationSize(12))
  );
  assert_eq!(
    Configuration::new(0.0, 16, [1e3, 2e3]),
    Err(ConfigError::InvalidSampleRate(0.0))
  );
  assert!(matches!(
    Configuration::new(8000.0, 16, [3e3, 2e3]),
    Err(ConfigError::InvalidBand { .. })
  ));
  // above Nyquist
  assert!(matches!(
    Configuration::new(8000.0, 16, [1e3, 5e3]),
    Err(ConfigError::InvalidBand { .. })
  ));
  assert_eq!(Configuration::from_bitrate(3), Err(ConfigError::UnknownBitrate(3)));
  assert!(matches!(
    Configuration::default().with_symbol_duration(1e-6),
    Err(ConfigError::InvalidSymbolDuration(_))
  ));
}

#[test]
fn symbol_longer_than_baud_period() {
  let config = Configuration::new(8e3, 4, [1e3, 2e3]).unwrap();
  assert_eq!(
    config.clone().with_symbol_duration(3.0),
    Err(ConfigError::InvalidSymbolDuration(3.0))
  );
  // the longest accepted symbol still steps the carriers by a whole baud
  let slow = config.with_symbol_duration(2.0).unwrap();
  assert_eq!(slow.baud(), 1);
  assert_eq!(slow.carrier_count(), 1001);
}
