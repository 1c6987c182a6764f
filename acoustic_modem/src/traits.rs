mod phy;
mod stream;
pub use phy::{Bits, Detection, Detector, Demodulator, Modulator, PhyRx, Sampler, Samples};
pub use stream::{InStream, OutStream};
