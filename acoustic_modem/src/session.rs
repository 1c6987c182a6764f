//! Send/receive sessions over a PHY collaborator.
//!
//! Both sides start on a configuration known in advance.
//! With reconfiguration the sender first transmits a [`ReconfRecord`]
//! over the bootstrap configuration, then switches to the working one;
//! the receiver decodes the record and follows.

mod reconf;
pub use reconf::{ReconfRecord, RECONF_SILENCE, RECORD_SIZE};

mod send;
pub use send::{send, SendReport};

mod recv;
pub use recv::{recv, Receiver, RecvReport};
