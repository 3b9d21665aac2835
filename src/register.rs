//! Register values of the PWM controller
//!
//! Each channel owns an ON/OFF register pair holding the tick within the
//! PWM period at which the output switches. Only the OFF tick (the duty
//! cycle) is modified by the fader; the ON tick is forwarded as read.

use crate::error::InvalidArgument;

/// Number of PWM channels on the controller
pub const CHANNEL_COUNT: usize = 16;

/// Full register set of the controller, one pair per channel
pub type RegisterBlock = [RegisterPair; CHANNEL_COUNT];

/// Position within one PWM period (12-bit counter)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(u16);

impl Tick {
    /// Lowest tick
    pub const MIN: Self = Self(0);
    /// Highest tick of the 12-bit counter
    pub const MAX: Self = Self(4095);

    /// Create a tick, rejecting values above [`Tick::MAX`]
    pub const fn new(value: u16) -> Result<Self, InvalidArgument> {
        if value > Self::MAX.0 {
            return Err(InvalidArgument::TickOutOfRange);
        }
        Ok(Self(value))
    }

    /// Create a tick, clamping values above [`Tick::MAX`]
    pub const fn saturating(value: u16) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    /// Raw register value
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Absolute distance between two ticks
    pub const fn distance(self, other: Self) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl From<Tick> for u16 {
    fn from(value: Tick) -> Self {
        value.0
    }
}

impl TryFrom<u16> for Tick {
    type Error = InvalidArgument;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ON/OFF register pair of a single channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RegisterPair {
    /// Tick at which the output turns on
    pub on: Tick,
    /// Tick at which the output turns off
    pub off: Tick,
}

impl RegisterPair {
    pub const fn new(on: Tick, off: Tick) -> Self {
        Self { on, off }
    }

    /// Pair that turns on at the start of the period
    pub const fn off_only(off: Tick) -> Self {
        Self { on: Tick::MIN, off }
    }

    /// Same pair with a different OFF tick
    pub const fn with_off(self, off: Tick) -> Self {
        Self { on: self.on, off }
    }
}

/// Register block with every channel fully off
pub const fn dark_block() -> RegisterBlock {
    [RegisterPair::off_only(Tick::MIN); CHANNEL_COUNT]
}
