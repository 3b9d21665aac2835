#![no_std]

pub mod brightness;
pub mod channel;
pub mod error;
pub mod fader;
pub mod memory;
pub mod register;
pub mod transition;

pub use brightness::{
    Brightness, BrightnessCurve, DEFAULT_BRIGHTNESS, linear_map, perceptual_map,
};
pub use channel::{ChannelMask, SelectedChannels};
pub use error::{FadeError, InvalidArgument};
pub use fader::{DEFAULT_STEP, FadeConfig, Fader};
pub use memory::{MemoryError, MemoryRegisters};
pub use register::{CHANNEL_COUNT, RegisterBlock, RegisterPair, Tick};
pub use transition::{Fade, Step, step_toward};
pub use embassy_time::Duration;

/// Abstract register transport
///
/// Implement this trait to drive a controller over a concrete bus. The
/// transport owns the device handle and its configuration (bus, address,
/// PWM frequency) from construction. Both operations cover all channels
/// at once; the fader never issues partial writes.
pub trait RegisterDriver {
    /// Transport failure
    type Error;

    /// Read the ON/OFF pair of every channel
    fn read_all(&mut self) -> Result<RegisterBlock, Self::Error>;

    /// Write the ON/OFF pair of every channel
    fn write_all(&mut self, block: &RegisterBlock) -> Result<(), Self::Error>;
}

impl<T: RegisterDriver + ?Sized> RegisterDriver for &mut T {
    type Error = T::Error;

    fn read_all(&mut self) -> Result<RegisterBlock, Self::Error> {
        T::read_all(self)
    }

    fn write_all(&mut self, block: &RegisterBlock) -> Result<(), Self::Error> {
        T::write_all(self, block)
    }
}
