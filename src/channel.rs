//! Channel selection.
//!
//! A selection is a 16-bit mask over the controller channels; bit `i` set
//! means channel `i` takes part in the operation. Selected indices are
//! exposed through [`SelectedChannels`], a lazy iterator that can be
//! copied and restarted at will.

use crate::error::InvalidArgument;
use crate::register::CHANNEL_COUNT;

/// Set of channels an operation applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChannelMask(u16);

impl ChannelMask {
    /// Every channel
    pub const ALL: Self = Self(0xFFFF);
    /// No channel
    pub const NONE: Self = Self(0);

    /// Create a selection from a raw 16-bit mask
    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    /// Create a selection from a wider mask
    ///
    /// Returns an error if a bit above channel 15 is set.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_bits(bits: u32) -> Result<Self, InvalidArgument> {
        if bits > u16::MAX as u32 {
            return Err(InvalidArgument::ChannelSelection);
        }
        Ok(Self(bits as u16))
    }

    /// Select a single channel
    pub const fn single(index: u8) -> Result<Self, InvalidArgument> {
        if index as usize >= CHANNEL_COUNT {
            return Err(InvalidArgument::ChannelSelection);
        }
        Ok(Self(1 << index))
    }

    /// Raw mask
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Check if channel `index` is selected
    pub const fn contains(self, index: usize) -> bool {
        index < CHANNEL_COUNT && self.0 & (1 << index) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of selected channels
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selection with channel `index` added
    pub const fn with(self, index: u8) -> Result<Self, InvalidArgument> {
        match Self::single(index) {
            Ok(single) => Ok(Self(self.0 | single.0)),
            Err(err) => Err(err),
        }
    }

    /// Iterate over selected channel indices in ascending order
    pub const fn iter(self) -> SelectedChannels {
        SelectedChannels { remaining: self.0 }
    }
}

impl From<u16> for ChannelMask {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

impl IntoIterator for ChannelMask {
    type Item = usize;
    type IntoIter = SelectedChannels;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the indices of a [`ChannelMask`]
#[derive(Debug, Clone, Copy)]
pub struct SelectedChannels {
    remaining: u16,
}

impl Iterator for SelectedChannels {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.remaining.trailing_zeros() as usize;
        // clear lowest set bit
        self.remaining &= self.remaining - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SelectedChannels {}

impl core::iter::FusedIterator for SelectedChannels {}
