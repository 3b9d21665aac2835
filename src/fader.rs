//! Fade driver.
//!
//! Runs fades and instant duty-cycle changes against a [`RegisterDriver`].
//! Each operation reads the full register block once, then writes complete
//! blocks back; the caller-supplied delay paces consecutive writes. A
//! failed write stops the operation and leaves the device at the last
//! block that was written.

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

use crate::RegisterDriver;
use crate::brightness::{Brightness, BrightnessCurve};
use crate::channel::ChannelMask;
use crate::error::{FadeError, InvalidArgument};
use crate::register::{CHANNEL_COUNT, RegisterBlock, RegisterPair, Tick};
use crate::transition::{Fade, Step};

/// Step used when none was configured
pub const DEFAULT_STEP: u16 = 1;

/// Fade settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeConfig {
    /// Maximum tick change per write, must be non-zero
    pub step: u16,
    /// Pause between consecutive writes
    pub delay: Duration,
    /// Brightness mapping used by brightness based operations
    pub curve: BrightnessCurve,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            delay: Duration::from_millis(0),
            curve: BrightnessCurve::Perceptual,
        }
    }
}

/// Fades PWM channels through a register transport
pub struct Fader<D: RegisterDriver, P: DelayNs> {
    driver: D,
    delay: P,
    config: FadeConfig,
}

impl<D: RegisterDriver, P: DelayNs> Fader<D, P> {
    pub const fn new(driver: D, delay: P, config: FadeConfig) -> Self {
        Self {
            driver,
            delay,
            config,
        }
    }

    pub const fn config(&self) -> &FadeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FadeConfig) {
        self.config = config;
    }

    /// Access the underlying transport
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Give back the transport and the delay
    pub fn release(self) -> (D, P) {
        (self.driver, self.delay)
    }

    /// Read the register block of every channel
    pub fn read(&mut self) -> Result<RegisterBlock, FadeError<D::Error>> {
        self.driver.read_all().map_err(FadeError::Io)
    }

    /// Read the register pair of channel `index`
    pub fn read_channel(&mut self, index: u8) -> Result<RegisterPair, FadeError<D::Error>> {
        let index = usize::from(index);
        if index >= CHANNEL_COUNT {
            return Err(InvalidArgument::ChannelSelection.into());
        }
        Ok(self.read()?[index])
    }

    /// Fade the selected channels to `brightness` percent
    ///
    /// Uses the configured curve. Returns the number of writes issued.
    pub fn fade(
        &mut self,
        mask: ChannelMask,
        brightness: f32,
    ) -> Result<usize, FadeError<D::Error>> {
        let target = self.target_tick(brightness)?;
        self.fade_to_tick(mask, target)
    }

    /// Fade the selected channels to `target`
    ///
    /// The step is validated before the device is touched. An empty
    /// selection returns immediately without reading or writing.
    /// Returns the number of writes issued.
    pub fn fade_to_tick(
        &mut self,
        mask: ChannelMask,
        target: Tick,
    ) -> Result<usize, FadeError<D::Error>> {
        let step = Step::new(self.config.step)?;
        if mask.is_empty() {
            return Ok(0);
        }

        let initial = self.read()?;
        let fade = Fade::new(initial, mask, target, step);
        let total = fade.len();
        #[cfg(feature = "log")]
        log::debug!(
            "[Fader.fade] channels {:#06x} -> {} in {} writes (step {})",
            mask.bits(),
            target.get(),
            total,
            step.get()
        );

        for (written, frame) in fade.enumerate() {
            if written > 0 {
                self.pause();
            }
            self.write(&frame)?;
            #[cfg(feature = "log")]
            log::trace!("[Fader.fade] write {}/{}", written + 1, total);
        }

        Ok(total)
    }

    /// Set the selected channels to `brightness` percent in a single write
    pub fn set_brightness(
        &mut self,
        mask: ChannelMask,
        brightness: f32,
    ) -> Result<(), FadeError<D::Error>> {
        let target = self.target_tick(brightness)?;
        self.set_duty_cycle(mask, target)
    }

    /// Set the OFF tick of the selected channels in a single write
    ///
    /// Unselected channels are written back as read. An empty selection
    /// is a no-op.
    pub fn set_duty_cycle(
        &mut self,
        mask: ChannelMask,
        target: Tick,
    ) -> Result<(), FadeError<D::Error>> {
        if mask.is_empty() {
            return Ok(());
        }

        let mut block = self.read()?;
        for index in mask {
            block[index] = block[index].with_off(target);
        }
        #[cfg(feature = "log")]
        log::debug!(
            "[Fader.set_duty_cycle] channels {:#06x} -> {}",
            mask.bits(),
            target.get()
        );
        self.write(&block)
    }

    fn target_tick(&self, brightness: f32) -> Result<Tick, InvalidArgument> {
        let brightness = Brightness::new(brightness)?;
        Ok(self.config.curve.to_tick(brightness))
    }

    fn write(&mut self, block: &RegisterBlock) -> Result<(), FadeError<D::Error>> {
        self.driver.write_all(block).map_err(|err| {
            #[cfg(feature = "log")]
            log::warn!("[Fader.write] register write failed, aborting");
            FadeError::Io(err)
        })
    }

    fn pause(&mut self) {
        let micros = self.config.delay.as_micros();
        if micros == 0 {
            return;
        }
        self.delay
            .delay_us(u32::try_from(micros).unwrap_or(u32::MAX));
    }
}
