#![cfg_attr(not(test), no_std)]

mod font;
mod gpio;
mod pins;
mod validate;

use core::fmt::Write as _;

pub use font::*;
pub use gpio::*;
pub use pins::*;
pub use validate::*;

/// Level that selects a digit
const DIGIT_ACTIVE: Level = Level::High;
const DIGIT_INACTIVE: Level = Level::Low;

/// The segment and decimal point lines sink current, so driving them low lights them up
const SEGMENT_LIT: Level = Level::Low;
const SEGMENT_DARK: Level = Level::High;
const POINT_LIT: Level = Level::Low;
const POINT_DARK: Level = Level::High;

pub struct FourSegDisplayBuilder;

impl FourSegDisplayBuilder {
    /// Drive the display through an arbitrary [`Gpio`] implementation
    pub fn with_gpio<G: Gpio>(self, gpio: G) -> FourSegDisplayBuilder1<G> {
        FourSegDisplayBuilder1 {
            gpio,
            pins: PinAssignment::default(),
        }
    }

    /// Drive the display through the given Embassy RP HAL pins.  [`PinId`] `n` refers to `pins[n]`.
    #[cfg(feature = "embassy-rp")]
    pub fn with_embassy_rp_pins<'a, const N: usize>(
        self,
        pins: [embassy_rp::gpio::AnyPin; N],
    ) -> FourSegDisplayBuilder1<EmbassyRpGpio<'a, N>> {
        self.with_gpio(EmbassyRpGpio::new(pins))
    }
}

pub struct FourSegDisplayBuilder1<G: Gpio> {
    gpio: G,
    pins: PinAssignment,
}

impl<G: Gpio> FourSegDisplayBuilder1<G> {
    /// Use a wiring other than the default one.  See [`PinAssignment`].
    pub fn with_pin_assignment(self, pins: PinAssignment) -> Self {
        Self { pins, ..self }
    }

    /// Use an arbitrary [`Timer`] implementation to hold each digit
    pub fn with_timer<T: Timer>(self, timer: T) -> FourSegDisplayBuilder2<G, T> {
        FourSegDisplayBuilder2 {
            gpio: self.gpio,
            timer,
            pins: self.pins,
        }
    }

    /// Hold each digit by busy-waiting on an Embedded HAL delay
    pub fn with_delay<D: embedded_hal_1::delay::DelayNs>(
        self,
        delay: D,
    ) -> FourSegDisplayBuilder2<G, DelayTimer<D>> {
        self.with_timer(DelayTimer::new(delay))
    }

    /// Use the [`Timer`] implementation built using `embassy-time`
    #[cfg(feature = "embassy-time")]
    pub fn with_embassy_timer(self) -> FourSegDisplayBuilder2<G, EmbassyTimeTimer> {
        self.with_timer(EmbassyTimeTimer)
    }
}

pub struct FourSegDisplayBuilder2<G: Gpio, T: Timer> {
    gpio: G,
    timer: T,
    pins: PinAssignment,
}

impl<G: Gpio, T: Timer> FourSegDisplayBuilder2<G, T> {
    /// Construct the [`FourSegDisplay`], configuring all of its pins as outputs.
    ///
    /// This is fallible if the underlying GPIO implementation is.
    pub fn build(self) -> Result<FourSegDisplay<G, T>, G::Error> {
        FourSegDisplay::new(self.gpio, self.timer, self.pins)
    }
}

/// Driver for a multiplexed 4-digit 7-segment display.
///
/// All four digits share the same seven segment lines and decimal point line, and each has its own
/// enable line.  Only one digit can be lit at a time, so to show a whole number the driver lights
/// each digit in turn, holding it for a moment with the [`Timer`].  Done quickly enough, the eye
/// sees all of the digits at once.
///
/// Each `render_*` call goes through its digits exactly once and then leaves the last one lit.
/// There is no background refresh: to keep a value on the display, render it again and again,
/// for example in a loop:
///
/// ```
/// # use fourseg::{FourSegDisplay, Gpio, Level, PinId, Timer};
/// # struct NullGpio;
/// # impl Gpio for NullGpio {
/// #     type Error = core::convert::Infallible;
/// #     fn configure_output(&mut self, _: PinId) -> Result<(), Self::Error> { Ok(()) }
/// #     fn write_digital(&mut self, _: PinId, _: Level) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct NullTimer;
/// # impl Timer for NullTimer { async fn settle(&mut self) {} }
/// # embassy_futures::block_on(async {
/// let mut display = FourSegDisplay::builder()
///     .with_gpio(NullGpio)
///     .with_timer(NullTimer)
///     .build()
///     .unwrap();
///
/// for _ in 0..100 {
///     display.render_value("12.5").await.unwrap();
/// }
/// display.clear().unwrap();
/// # });
/// ```
///
/// The electrical conventions are those of a common-anode display: an enable line selects its
/// digit when driven high, and segment and decimal point lines light up when driven low.
pub struct FourSegDisplay<G, T> {
    gpio: G,
    timer: T,
    pins: PinAssignment,
}

impl FourSegDisplay<(), ()> {
    /// Return a builder pattern implementation to ease some of the type parameter complexity
    /// around choosing the GPIO and timer implementations.
    ///
    /// This is not required; [`Self::new`] does the same thing.
    pub fn builder() -> FourSegDisplayBuilder {
        FourSegDisplayBuilder
    }
}

/// Generate one rebinding setter per pin role
macro_rules! pin_setters {
    ($($(#[$doc:meta])* $name:ident => $role:ident,)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, pin: PinId) -> Result<(), G::Error> {
                self.rebind(PinRole::$role, pin)
            }
        )*
    };
}

impl<G: Gpio, T: Timer> FourSegDisplay<G, T> {
    /// Take over the display wired as described by `pins`, configuring every pin as an output.
    pub fn new(gpio: G, timer: T, pins: PinAssignment) -> Result<Self, G::Error> {
        let mut me = Self { gpio, timer, pins };

        for (_role, pin) in me.pins.iter() {
            #[cfg(feature = "defmt")]
            defmt::trace!("{=str} on pin {=u8}", <&str>::from(_role), pin);
            me.gpio.configure_output(pin)?;
        }

        Ok(me)
    }

    pub fn pin_assignment(&self) -> &PinAssignment {
        &self.pins
    }

    /// Give back the GPIO and timer.  The display stays as it was last driven.
    pub fn release(self) -> (G, T) {
        (self.gpio, self.timer)
    }

    /// Move `role` to another physical line.
    ///
    /// The new pin is configured as an output before the role is bound to it.  The old pin is left
    /// as it was.
    pub fn rebind(&mut self, role: PinRole, pin: PinId) -> Result<(), G::Error> {
        self.gpio.configure_output(pin)?;
        let _previous = self.pins.set(role, pin);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{=str} moved from pin {=u8} to {=u8}",
            <&str>::from(role),
            _previous,
            pin
        );

        Ok(())
    }

    pin_setters! {
        set_pin_a => SegmentA,
        set_pin_b => SegmentB,
        set_pin_c => SegmentC,
        set_pin_d => SegmentD,
        set_pin_e => SegmentE,
        set_pin_f => SegmentF,
        set_pin_g => SegmentG,
        /// Move the decimal point line
        set_pin_dot => DecimalPoint,
        /// Move the enable line of the left-most digit
        set_pin_digit1 => Digit1,
        set_pin_digit2 => Digit2,
        set_pin_digit3 => Digit3,
        /// Move the enable line of the right-most digit
        set_pin_digit4 => Digit4,
    }

    /// Draw a number given as text, like `"12.5"`.
    ///
    /// Each digit takes up a slot, from left to right.  A `.` lights the decimal point of the digit
    /// before it and doesn't take up a slot of its own.
    ///
    /// A leading `.` has no digit to attach to.  Rather than re-select a slot and light the point
    /// line, which would light the point on whichever digit happens to still be selected, it is
    /// dropped: the decimal point line is not written and no hold is spent on it.
    ///
    /// Anything [`validate`] rejects is drawn as `Err` instead.  The only errors returned are
    /// from the GPIO implementation.
    pub async fn render_value(&mut self, request: &str) -> Result<(), G::Error> {
        if let Err(_error) = validate(request) {
            #[cfg(feature = "defmt")]
            defmt::debug!("cannot render {=str}: {}", request, _error);
            return self.render_error().await;
        }

        let mut slot = 1u8;

        for c in request.chars() {
            if let Some(glyph) = Glyph::from_ascii_digit(c) {
                self.draw(slot, glyph).await?;
                slot += 1;
            } else if slot > 1 {
                // Validation only lets digits and points through, so this is a point.  The previous
                // digit's segments are still being driven; go back to its slot and add the point
                self.select_digit(slot - 1)?;
                self.gpio
                    .write_digital(self.pins.pin(PinRole::DecimalPoint), POINT_LIT)?;
                self.timer.settle().await;
            } else {
                #[cfg(feature = "defmt")]
                defmt::trace!("leading decimal point in {=str} not drawn", request);
            }
        }

        Ok(())
    }

    /// Draw an unsigned integer.  Anything above 9999 doesn't fit and is drawn as `Err`.
    pub async fn render_number(&mut self, value: u16) -> Result<(), G::Error> {
        // "65535" is the longest there is
        let mut text = heapless::String::<5>::new();

        if write!(text, "{value}").is_err() {
            return self.render_error().await;
        }

        self.render_value(&text).await
    }

    /// Spell `On` if `on` is true, otherwise `OFF`
    pub async fn render_state(&mut self, on: bool) -> Result<(), G::Error> {
        self.draw(1, Glyph::O).await?;

        if on {
            self.draw(2, Glyph::N).await
        } else {
            self.draw(2, Glyph::F).await?;
            self.draw(3, Glyph::F).await
        }
    }

    /// Spell `Err`
    pub async fn render_error(&mut self) -> Result<(), G::Error> {
        self.draw(1, Glyph::E).await?;
        self.draw(2, Glyph::R).await?;
        self.draw(3, Glyph::R).await
    }

    /// Turn the display off by deselecting every digit.
    ///
    /// The segment lines keep their last levels, which doesn't matter with no digit selected.
    pub fn clear(&mut self) -> Result<(), G::Error> {
        for slot in 1..=DIGIT_COUNT {
            self.write_digit_enable(slot, DIGIT_INACTIVE)?;
        }

        Ok(())
    }

    /// Select the 1-based digit `slot`, so that it shows whatever the segment lines are driving.
    ///
    /// The other three digits are deselected first, so at no point are two digits selected at
    /// once.  A slot outside `1..=4` doesn't exist and nothing is written.
    pub fn select_digit(&mut self, slot: u8) -> Result<(), G::Error> {
        if PinRole::for_digit(slot).is_none() {
            return Ok(());
        }

        for other in (1..=DIGIT_COUNT).filter(|other| *other != slot) {
            self.write_digit_enable(other, DIGIT_INACTIVE)?;
        }

        self.write_digit_enable(slot, DIGIT_ACTIVE)
    }

    /// Select `slot`, drive `glyph` with a dark decimal point, and hold it
    async fn draw(&mut self, slot: u8, glyph: Glyph) -> Result<(), G::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("slot {=u8} = {}", slot, glyph);

        self.select_digit(slot)?;
        self.gpio
            .write_digital(self.pins.pin(PinRole::DecimalPoint), POINT_DARK)?;
        self.write_pattern(glyph.pattern())?;
        self.timer.settle().await;

        Ok(())
    }

    fn write_pattern(&mut self, pattern: GlyphPattern) -> Result<(), G::Error> {
        use strum::VariantArray;

        for segment in Segment::VARIANTS {
            let level = if pattern.is_lit(*segment) {
                SEGMENT_LIT
            } else {
                SEGMENT_DARK
            };
            let pin = self.pins.pin(PinRole::for_segment(*segment));
            self.gpio.write_digital(pin, level)?;
        }

        Ok(())
    }

    fn write_digit_enable(&mut self, slot: u8, level: Level) -> Result<(), G::Error> {
        if let Some(role) = PinRole::for_digit(slot) {
            self.gpio.write_digital(self.pins.pin(role), level)?;
        }

        Ok(())
    }
}
