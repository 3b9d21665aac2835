/// Caller errors detected before any register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    /// Brightness is NaN or outside of `0.0..=100.0`
    BrightnessOutOfRange,
    /// Fade step is zero
    ZeroStep,
    /// Channel selection refers to a channel the controller does not have
    ChannelSelection,
    /// Tick value exceeds the 12-bit register range
    TickOutOfRange,
}

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BrightnessOutOfRange => write!(f, "brightness must be within 0..=100"),
            Self::ZeroStep => write!(f, "fade step must be at least 1"),
            Self::ChannelSelection => write!(f, "channel selection is out of range"),
            Self::TickOutOfRange => write!(f, "tick value must be within 0..=4095"),
        }
    }
}

impl core::error::Error for InvalidArgument {}

/// Error returned by fader operations
///
/// `E` is the error type of the underlying [`RegisterDriver`](crate::RegisterDriver).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeError<E> {
    /// Invalid input, nothing was written
    InvalidArgument(InvalidArgument),
    /// Transport failure, propagated unchanged
    Io(E),
}

impl<E> From<InvalidArgument> for FadeError<E> {
    fn from(value: InvalidArgument) -> Self {
        Self::InvalidArgument(value)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for FadeError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::Io(err) => write!(f, "register access failed: {err:?}"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for FadeError<E> {}
