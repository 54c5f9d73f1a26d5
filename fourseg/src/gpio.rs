//! Module describing the [`Gpio`] and [`Timer`] traits the display is driven through, and various
//! implementations depending on target platform.

// `Timer::settle` is an `async fn` in a public trait, which rustc warns about because callers can't
// name a `Send` bound on the returned future.  Every executor this runs on is single-threaded, so
// the bound never matters here.
#![allow(async_fn_in_trait)]

use crate::pins::PinId;

/// Logic level of an output line
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

/// The two GPIO primitives everything the display draws is made of.
///
/// Pins are addressed by a [`PinId`] rather than owned individually so that any role can be moved
/// to another line at runtime, which is what [`crate::FourSegDisplay::rebind`] does.
///
/// Depending on the features enabled in this crate, there are some built-in implementations
/// available.  [`OutputPinBank`] works with any Embedded HAL output pins.
pub trait Gpio {
    type Error;

    /// Make `pin` a digital output.  Called once per pin before it is first written, and again
    /// whenever a role is rebound to it.
    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Drive `pin` to `level`
    fn write_digital(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error>;
}

impl<G: Gpio> Gpio for &mut G {
    type Error = G::Error;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        (**self).configure_output(pin)
    }

    fn write_digital(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
        (**self).write_digital(pin, level)
    }
}

/// Abstraction on platform-specific timers, used to hold each digit long enough for it to be seen.
///
/// The driver only ever needs one delay, the per-digit hold, so this is all it asks of a clock.
/// [`DelayTimer`] covers any blocking `DelayNs`, and with the `embassy-time` feature
/// `EmbassyTimeTimer` yields to the executor instead.
pub trait Timer {
    /// Wait for the settle interval with the current digit selected and driven.
    ///
    /// This should be about [`SETTLE_MICROS`].  Much shorter and the digit never lights up
    /// properly; much longer and the display visibly flickers.
    async fn settle(&mut self);
}

/// How long each digit stays selected, in microseconds
pub const SETTLE_MICROS: u32 = 1_000;

/// [`Timer`] that busy-waits on any Embedded HAL [`DelayNs`](embedded_hal_1::delay::DelayNs).
///
/// Useful without an async executor, or to plug in a no-op delay in tests.  The returned future
/// completes only after the delay has elapsed, blocking whatever executor polls it.
pub struct DelayTimer<D>(D);

impl<D: embedded_hal_1::delay::DelayNs> DelayTimer<D> {
    pub fn new(delay: D) -> Self {
        Self(delay)
    }

    pub fn into_inner(self) -> D {
        self.0
    }
}

impl<D: embedded_hal_1::delay::DelayNs> Timer for DelayTimer<D> {
    async fn settle(&mut self) {
        self.0.delay_us(SETTLE_MICROS);
    }
}

/// Error from one of the built-in pin bank [`Gpio`] implementations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinBankError<E> {
    /// The pin id is past the end of the bank
    UnknownPin(PinId),
    /// The pin itself reported an error
    Pin(E),
}

/// Implementation of [`Gpio`] over an array of Embedded HAL output pins, with the [`PinId`] being
/// the index into the array.
///
/// The pins are outputs by type already, so [`Gpio::configure_output`] only checks that the pin
/// exists.
pub struct OutputPinBank<P, const N: usize>([P; N]);

impl<P: embedded_hal_1::digital::OutputPin, const N: usize> OutputPinBank<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self(pins)
    }

    pub fn into_inner(self) -> [P; N] {
        self.0
    }

    fn get_mut(&mut self, pin: PinId) -> Result<&mut P, PinBankError<P::Error>> {
        self.0
            .get_mut(usize::from(pin))
            .ok_or(PinBankError::UnknownPin(pin))
    }
}

impl<P: embedded_hal_1::digital::OutputPin, const N: usize> Gpio for OutputPinBank<P, N> {
    type Error = PinBankError<P::Error>;

    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.get_mut(pin).map(|_| ())
    }

    fn write_digital(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
        let state = embedded_hal_1::digital::PinState::from(bool::from(level));
        self.get_mut(pin)?
            .set_state(state)
            .map_err(PinBankError::Pin)
    }
}

#[cfg(feature = "embassy-time")]
mod embassy_time_timer {
    use embassy_time::{Duration, Timer as EmbassyTimer};

    /// Hold each digit for a millisecond, which refreshes all four faster than the eye can follow
    const SETTLE: Duration = Duration::from_micros(super::SETTLE_MICROS as u64);

    pub struct EmbassyTimeTimer;

    impl super::Timer for EmbassyTimeTimer {
        async fn settle(&mut self) {
            EmbassyTimer::after(SETTLE).await
        }
    }
}

#[cfg(feature = "embassy-time")]
pub use embassy_time_timer::EmbassyTimeTimer;

#[cfg(feature = "embassy-rp")]
mod embassy_rp_gpio {
    use super::{Level, PinBankError};
    use crate::pins::PinId;
    use core::convert::Infallible;
    use embassy_rp::gpio;

    /// Implementation of [`super::Gpio`] that uses the Embassy RP HAL for the RP2040
    /// microcontroller.
    ///
    /// Each pin starts out as a [`gpio::Flex`] in its reset state, and becomes an output when
    /// [`super::Gpio::configure_output`] is called for it.
    pub struct EmbassyRpGpio<'a, const N: usize> {
        pins: [gpio::Flex<'a, gpio::AnyPin>; N],
    }

    impl<'a, const N: usize> EmbassyRpGpio<'a, N> {
        /// Take ownership of `pins`.  [`PinId`] `n` refers to `pins[n]`.
        pub fn new(pins: [gpio::AnyPin; N]) -> Self {
            Self {
                pins: pins.map(|pin| gpio::Flex::new(pin)),
            }
        }

        fn get_mut(
            &mut self,
            pin: PinId,
        ) -> Result<&mut gpio::Flex<'a, gpio::AnyPin>, PinBankError<Infallible>> {
            self.pins
                .get_mut(usize::from(pin))
                .ok_or(PinBankError::UnknownPin(pin))
        }
    }

    impl<'a, const N: usize> super::Gpio for EmbassyRpGpio<'a, N> {
        type Error = PinBankError<Infallible>;

        fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
            self.get_mut(pin)?.set_as_output();

            Ok(())
        }

        fn write_digital(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
            let level = match level {
                Level::Low => gpio::Level::Low,
                Level::High => gpio::Level::High,
            };
            self.get_mut(pin)?.set_level(level);

            Ok(())
        }
    }
}

#[cfg(feature = "embassy-rp")]
pub use embassy_rp_gpio::EmbassyRpGpio;
