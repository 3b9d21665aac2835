use crate::channel::ChannelMask;
use crate::error::InvalidArgument;
use crate::register::{RegisterBlock, Tick};

/// Maximum tick change applied to a channel per iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Step(u16);

impl Step {
    /// Smallest step, one tick per iteration
    pub const MIN: Self = Self(1);
    /// Covers the whole register range in a single iteration
    pub const INSTANT: Self = Self(Tick::MAX.get());

    /// Create a step, rejecting zero
    pub const fn new(value: u16) -> Result<Self, InvalidArgument> {
        if value == 0 {
            return Err(InvalidArgument::ZeroStep);
        }
        Ok(Self(value))
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    /// Number of iterations needed to cover `distance`
    pub const fn iterations(self, distance: u16) -> u16 {
        distance.div_ceil(self.0)
    }
}

/// Move `current` toward `target` by at most `step`
///
/// Never overshoots; returns `target` once it is within reach.
pub const fn step_toward(current: Tick, target: Tick, step: Step) -> Tick {
    let current = current.get();
    let target = target.get();
    let next = if current < target {
        current + min(step.get(), target - current)
    } else {
        current - min(step.get(), current - target)
    };
    Tick::saturating(next)
}

const fn min(a: u16, b: u16) -> u16 {
    if a < b { a } else { b }
}

/// Step-wise fade of the selected channels toward a common target
///
/// Yields one complete register block per iteration. Every selected
/// channel moves at the same rate and the iterator ends once all of them
/// sit on the target, so the length is `ceil(max_distance / step)`.
/// Unselected channels are copied from the initial block untouched.
#[derive(Debug, Clone)]
pub struct Fade {
    frame: RegisterBlock,
    mask: ChannelMask,
    target: Tick,
    step: Step,
    remaining: u16,
}

impl Fade {
    /// Plan a fade starting from `initial`
    pub fn new(initial: RegisterBlock, mask: ChannelMask, target: Tick, step: Step) -> Self {
        let max_distance = mask
            .iter()
            .map(|index| initial[index].off.distance(target))
            .max()
            .unwrap_or(0);

        Self {
            frame: initial,
            mask,
            target,
            step,
            remaining: step.iterations(max_distance),
        }
    }

    /// Common target tick
    pub const fn target(&self) -> Tick {
        self.target
    }

    /// Latest frame (the initial block before the first iteration)
    pub const fn frame(&self) -> &RegisterBlock {
        &self.frame
    }

    /// Check if there are iterations left
    pub const fn is_transitioning(&self) -> bool {
        self.remaining > 0
    }
}

impl Iterator for Fade {
    type Item = RegisterBlock;

    fn next(&mut self) -> Option<RegisterBlock> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        for index in self.mask {
            let pair = &mut self.frame[index];
            pair.off = step_toward(pair.off, self.target, self.step);
        }
        debug_assert!(
            self.remaining > 0 || self.mask.iter().all(|i| self.frame[i].off == self.target),
            "fade finished before reaching target"
        );

        Some(self.frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Fade {}

impl core::iter::FusedIterator for Fade {}
