//! GPIO pin abstractions
//!
//! A [`GpioPin`] buffers direction and value changes until they are
//! explicitly flushed, and only re-samples its input when refreshed. The
//! command dispatcher relies on that ordering: every mutation is followed by
//! the matching flush, every read is preceded by a refresh.

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Buffered GPIO pin handle
///
/// Changes made with `set_direction_*` and `write` have no hardware effect
/// until `flush_direction` / `flush_value` is called.
pub trait GpioPin {
    /// Stage the pin as an input
    fn set_direction_input(&mut self);

    /// Stage the pin as an output
    fn set_direction_output(&mut self);

    /// Commit a staged direction change to hardware
    fn flush_direction(&mut self);

    /// Stage an output level (true = logic 1)
    fn write(&mut self, high: bool);

    /// Commit a staged output level to hardware
    fn flush_value(&mut self);

    /// Re-sample the live input level into the readable cache
    fn refresh(&mut self);

    /// Cached input level as of the last `refresh`
    fn read(&self) -> bool;
}

impl<P: GpioPin + ?Sized> GpioPin for &mut P {
    fn set_direction_input(&mut self) {
        (**self).set_direction_input()
    }

    fn set_direction_output(&mut self) {
        (**self).set_direction_output()
    }

    fn flush_direction(&mut self) {
        (**self).flush_direction()
    }

    fn write(&mut self, high: bool) {
        (**self).write(high)
    }

    fn flush_value(&mut self) {
        (**self).flush_value()
    }

    fn refresh(&mut self) {
        (**self).refresh()
    }

    fn read(&self) -> bool {
        (**self).read()
    }
}

/// Immediate hardware access for a single pin
///
/// Implemented by chip-specific HALs. Every call takes effect at once;
/// buffering is provided by [`BufferedPin`].
pub trait RawGpio {
    /// Switch the pin direction
    fn apply_direction(&mut self, direction: Direction);

    /// Drive the output level
    fn apply_level(&mut self, high: bool);

    /// Sample the live input level
    fn sample(&self) -> bool;
}

/// [`GpioPin`] built on top of a [`RawGpio`]
///
/// Holds at most one pending direction and one pending level. A flush with
/// nothing pending leaves the hardware untouched.
pub struct BufferedPin<R> {
    raw: R,
    pending_direction: Option<Direction>,
    pending_level: Option<bool>,
    cached_input: bool,
}

impl<R: RawGpio> BufferedPin<R> {
    /// Wrap a raw pin. The input cache starts low until the first refresh.
    pub fn new(raw: R) -> Self {
        Self {
            raw,
            pending_direction: None,
            pending_level: None,
            cached_input: false,
        }
    }

    /// Direction waiting for `flush_direction`, if any
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Level waiting for `flush_value`, if any
    pub fn pending_level(&self) -> Option<bool> {
        self.pending_level
    }

    /// Access the underlying raw pin
    pub fn raw(&self) -> &R {
        &self.raw
    }

    /// Release the underlying raw pin, dropping anything still pending
    pub fn into_inner(self) -> R {
        self.raw
    }
}

impl<R: RawGpio> GpioPin for BufferedPin<R> {
    fn set_direction_input(&mut self) {
        self.pending_direction = Some(Direction::Input);
    }

    fn set_direction_output(&mut self) {
        self.pending_direction = Some(Direction::Output);
    }

    fn flush_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.raw.apply_direction(direction);
        }
    }

    fn write(&mut self, high: bool) {
        self.pending_level = Some(high);
    }

    fn flush_value(&mut self) {
        if let Some(high) = self.pending_level.take() {
            self.raw.apply_level(high);
        }
    }

    fn refresh(&mut self) {
        self.cached_input = self.raw.sample();
    }

    fn read(&self) -> bool {
        self.cached_input
    }
}
