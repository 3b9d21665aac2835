//! Brightness to tick mapping
//!
//! Converts a brightness percentage into an OFF tick, either linearly or
//! through the Rec.709 transfer curve so that equal brightness increments
//! look equally large to the eye.

use crate::error::InvalidArgument;
use crate::register::Tick;

const CURVE_NAME_LINEAR: &str = "linear";
const CURVE_NAME_PERCEPTUAL: &str = "perceptual";

const CURVE_ID_LINEAR: u8 = 0;
const CURVE_ID_PERCEPTUAL: u8 = 1;

/// Brightness used when none was requested
pub const DEFAULT_BRIGHTNESS: f32 = 50.0;

/// Rec.709 linear segment threshold (normalized signal)
const REC709_THRESHOLD: f32 = 0.081;
/// Rec.709 linear segment slope
const REC709_SLOPE: f32 = 4.5;
const REC709_OFFSET: f32 = 0.099;
const REC709_SCALE: f32 = 1.099;
const REC709_EXPONENT: f32 = 1.0 / 0.45;
/// Value of the linear segment at the threshold.
///
/// The power segment starts slightly below it; results are held here until
/// the curve catches up so the mapping never decreases.
const REC709_KNEE: f32 = REC709_THRESHOLD / REC709_SLOPE;

const TICK_SCALE: f32 = Tick::MAX.get() as f32;

/// Brightness percentage (`0.0..=100.0`)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Brightness(f32);

impl Brightness {
    pub const OFF: Self = Self(0.0);
    pub const FULL: Self = Self(100.0);

    /// Validate a brightness percentage
    ///
    /// NaN and values outside of `0.0..=100.0` are rejected, never clamped.
    pub fn new(percent: f32) -> Result<Self, InvalidArgument> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(InvalidArgument::BrightnessOutOfRange);
        }
        Ok(Self(percent))
    }

    pub const fn percent(self) -> f32 {
        self.0
    }

    /// Brightness as a fraction of full scale
    pub fn fraction(self) -> f32 {
        self.0 / 100.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(DEFAULT_BRIGHTNESS)
    }
}

impl TryFrom<f32> for Brightness {
    type Error = InvalidArgument;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Brightness mapping policy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum BrightnessCurve {
    /// Tick proportional to brightness
    Linear = CURVE_ID_LINEAR,
    /// Rec.709 corrected, visually uniform steps
    #[default]
    Perceptual = CURVE_ID_PERCEPTUAL,
}

impl BrightnessCurve {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            CURVE_ID_LINEAR => Self::Linear,
            CURVE_ID_PERCEPTUAL => Self::Perceptual,
            _ => return None,
        })
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Some(match s {
            CURVE_NAME_LINEAR => Self::Linear,
            CURVE_NAME_PERCEPTUAL => Self::Perceptual,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => CURVE_NAME_LINEAR,
            Self::Perceptual => CURVE_NAME_PERCEPTUAL,
        }
    }

    /// Map a validated brightness to a tick
    pub fn to_tick(self, brightness: Brightness) -> Tick {
        match self {
            Self::Linear => linear_tick(brightness),
            Self::Perceptual => perceptual_tick(brightness),
        }
    }

    /// Validate and map a raw brightness percentage
    pub fn map(self, percent: f32) -> Result<Tick, InvalidArgument> {
        Brightness::new(percent).map(|brightness| self.to_tick(brightness))
    }
}

/// Map brightness linearly: `round(percent / 100 * 4095)`
pub fn linear_map(percent: f32) -> Result<Tick, InvalidArgument> {
    BrightnessCurve::Linear.map(percent)
}

/// Map brightness through the Rec.709 transfer curve
pub fn perceptual_map(percent: f32) -> Result<Tick, InvalidArgument> {
    BrightnessCurve::Perceptual.map(percent)
}

fn linear_tick(brightness: Brightness) -> Tick {
    fraction_to_tick(brightness.fraction())
}

fn perceptual_tick(brightness: Brightness) -> Tick {
    let level = brightness.fraction();
    let corrected = if level < REC709_THRESHOLD {
        level / REC709_SLOPE
    } else {
        let curve = libm::powf((level + REC709_OFFSET) / REC709_SCALE, REC709_EXPONENT);
        curve.max(REC709_KNEE)
    };
    // `corrected` is already a fraction, scale straight to ticks
    fraction_to_tick(corrected)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fraction_to_tick(fraction: f32) -> Tick {
    let ticks = libm::roundf(fraction.clamp(0.0, 1.0) * TICK_SCALE);
    Tick::saturating(ticks as u16)
}
