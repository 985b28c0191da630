//! Register definitions for the CC1101
//! Generated from the CC1101 datasheet (SWRS061)

mod map;
mod modem;
mod packet;
mod rf;
mod status;

pub use map::*;
pub use modem::*;
pub use packet::*;
pub use rf::*;
pub use status::*;

/// A register field held a code with no defined meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownValue(pub u8);
