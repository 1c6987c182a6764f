/// error types of the link layer
pub mod error;
pub use error::{ConfigError, Error, FramingError, NegotiationError, Result};

/// modem configuration: sample rate, constellation, carrier band, timings.
pub mod config;
pub use config::{Configuration, DefaultConfig};

/// define [`traits::InStream`]/[`traits::OutStream`] and the PHY collaborator traits.
pub mod traits;

/// byte stream <-> length prefixed Reed-Solomon frames <-> bit stream.
pub mod framing;

/// send/recv orchestration with optional reconfiguration over a bootstrap configuration.
pub mod session;

/// implementors of [`traits::InStream`] and [`traits::OutStream`], plus iterator adapters.
pub mod sample_stream;

/// baseband NRZ line code implementing the PHY collaborator traits.
pub mod line_code;
